use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;

use crate::opts::SessionOpts;
use crate::output::print_entry;

pub async fn run(opts: &SessionOpts) -> Result<()> {
    let config = opts.host_config();
    let kernel = config.build_kernel()?;
    let (join, handle) = aura_host::spawn(kernel);

    println!("Aura interactive session. Commands: :pause :resume :quit");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut printed = 0usize;

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            ":quit" | ":q" => break,
            ":pause" => {
                handle.pause().await?;
                println!("(paused)");
                continue;
            }
            ":resume" => {
                handle.resume().await?;
                handle.drain().await?;
                println!("(resumed)");
            }
            input => {
                handle.submit(input).await?;
                handle.drain().await?;
            }
        }

        let history = handle.history_tail(usize::MAX).await?;
        for entry in &history[printed.min(history.len())..] {
            print_entry(entry);
        }
        printed = history.len();
    }

    handle.shutdown().await?;
    join.await??;
    Ok(())
}
