use anyhow::Result;
use clap::Args;

use crate::opts::SessionOpts;
use crate::output::print_entry;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The command to submit
    pub input: String,
}

pub async fn run(opts: &SessionOpts, args: AskArgs) -> Result<()> {
    let config = opts.host_config();
    let kernel = config.build_kernel()?;
    let (join, handle) = aura_host::spawn(kernel);

    handle.submit(args.input).await?;
    handle.drain().await?;
    for entry in handle.history_tail(usize::MAX).await? {
        print_entry(&entry);
    }

    handle.shutdown().await?;
    join.await??;
    Ok(())
}
