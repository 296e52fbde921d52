use std::path::PathBuf;

use clap::Args;

use aura_host::HostConfig;

#[derive(Args, Debug, Clone)]
pub struct SessionOpts {
    /// Directory for the persistent action journal (overrides
    /// AURA_JOURNAL_DIR; omit for an in-memory session)
    #[arg(long, global = true)]
    pub journal_dir: Option<PathBuf>,
}

impl SessionOpts {
    pub fn host_config(&self) -> HostConfig {
        let mut config = HostConfig::from_env();
        if let Some(dir) = &self.journal_dir {
            config.journal_dir = Some(dir.clone());
        }
        config
    }
}
