use anyhow::{Context, Result};
use clap::Args;

use aura_state::journal::fs::FsJournal;
use aura_state::Store;

use crate::opts::SessionOpts;

#[derive(Args, Debug)]
pub struct JournalArgs {
    /// Print only the last N actions
    #[arg(long)]
    pub tail: Option<usize>,
}

pub fn run(opts: &SessionOpts, args: JournalArgs) -> Result<()> {
    let config = opts.host_config();
    let dir = config.journal_dir.clone().context(
        "no journal directory configured; pass --journal-dir or set AURA_JOURNAL_DIR",
    )?;

    let journal = FsJournal::open(&dir)?;
    let store = Store::open(Box::new(journal))?;
    let actions = store.actions()?;

    let start = args
        .tail
        .map(|n| actions.len().saturating_sub(n))
        .unwrap_or(0);
    for action in &actions[start..] {
        println!("{}", serde_json::to_string(action)?);
    }
    Ok(())
}
