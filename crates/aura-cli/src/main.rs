mod commands;
mod opts;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::ask::AskArgs;
use commands::journal::JournalArgs;
use opts::SessionOpts;

#[derive(Parser, Debug)]
#[command(name = "aura", version, about = "Aura cognitive kernel CLI")]
struct Cli {
    #[command(flatten)]
    opts: SessionOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one command, run the kernel to idle, print the transcript
    Ask(AskArgs),

    /// Interactive session
    Repl,

    /// Dump the persisted action journal
    Journal(JournalArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ask(args) => commands::ask::run(&cli.opts, args).await,
        Command::Repl => commands::repl::run(&cli.opts).await,
        Command::Journal(args) => commands::journal::run(&cli.opts, args),
    }
}
