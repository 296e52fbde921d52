//! The host daemon: owns a [`Kernel`], drains it to idle, then blocks on the
//! control channel. All external interaction goes through [`HostHandle`],
//! whose messages carry oneshot responders.

use aura_kernel::Kernel;
use aura_state::AuraState;
use aura_types::{Action, HistoryEntry, TraceId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::HostError;

const CONTROL_CHANNEL_CAPACITY: usize = 32;

/// Control message for the daemon.
#[derive(Debug)]
pub enum ControlMsg {
    Submit {
        input: String,
        resp: oneshot::Sender<Result<TraceId, HostError>>,
    },
    /// Respond once the kernel has drained to idle.
    Drain {
        resp: oneshot::Sender<Result<(), HostError>>,
    },
    Pause {
        resp: oneshot::Sender<Result<(), HostError>>,
    },
    Resume {
        resp: oneshot::Sender<Result<(), HostError>>,
    },
    HistoryTail {
        limit: usize,
        resp: oneshot::Sender<Vec<HistoryEntry>>,
    },
    Snapshot {
        resp: oneshot::Sender<Box<AuraState>>,
    },
    JournalDump {
        resp: oneshot::Sender<Result<Vec<Action>, HostError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Cloneable handle for talking to a running daemon.
#[derive(Debug, Clone)]
pub struct HostHandle {
    tx: mpsc::Sender<ControlMsg>,
}

impl HostHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ControlMsg,
    ) -> Result<T, HostError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(build(resp_tx))
            .await
            .map_err(|_| HostError::ChannelClosed)?;
        resp_rx.await.map_err(|_| HostError::ChannelClosed)
    }

    pub async fn submit(&self, input: impl Into<String>) -> Result<TraceId, HostError> {
        let input = input.into();
        self.request(|resp| ControlMsg::Submit { input, resp })
            .await?
    }

    /// Wait until the kernel has no queued or running work.
    pub async fn drain(&self) -> Result<(), HostError> {
        self.request(|resp| ControlMsg::Drain { resp }).await?
    }

    pub async fn pause(&self) -> Result<(), HostError> {
        self.request(|resp| ControlMsg::Pause { resp }).await?
    }

    pub async fn resume(&self) -> Result<(), HostError> {
        self.request(|resp| ControlMsg::Resume { resp }).await?
    }

    /// Last `limit` history entries.
    pub async fn history_tail(&self, limit: usize) -> Result<Vec<HistoryEntry>, HostError> {
        self.request(|resp| ControlMsg::HistoryTail { limit, resp })
            .await
    }

    pub async fn snapshot(&self) -> Result<AuraState, HostError> {
        self.request(|resp| ControlMsg::Snapshot { resp })
            .await
            .map(|state| *state)
    }

    pub async fn journal(&self) -> Result<Vec<Action>, HostError> {
        self.request(|resp| ControlMsg::JournalDump { resp }).await?
    }

    pub async fn shutdown(&self) -> Result<(), HostError> {
        self.request(|resp| ControlMsg::Shutdown { resp }).await
    }
}

/// The daemon task. Create with [`HostDaemon::new`], then either await
/// [`HostDaemon::run`] directly or use [`spawn`].
pub struct HostDaemon {
    kernel: Kernel,
    control_rx: mpsc::Receiver<ControlMsg>,
}

impl HostDaemon {
    pub fn new(kernel: Kernel) -> (Self, HostHandle) {
        let (tx, control_rx) = mpsc::channel(CONTROL_CHANNEL_CAPACITY);
        (Self { kernel, control_rx }, HostHandle { tx })
    }

    /// Run until shutdown or until every handle is dropped. The kernel is
    /// drained to idle after each control message, so queued work never waits
    /// on further input.
    pub async fn run(mut self) -> Result<(), HostError> {
        tracing::info!("host daemon started");
        loop {
            self.kernel.run_until_idle().await?;
            match self.control_rx.recv().await {
                None => break,
                Some(msg) => {
                    if self.handle(msg).await? {
                        break;
                    }
                }
            }
        }
        tracing::info!("host daemon stopped");
        Ok(())
    }

    /// Handle one control message; true means shutdown.
    async fn handle(&mut self, msg: ControlMsg) -> Result<bool, HostError> {
        match msg {
            ControlMsg::Submit { input, resp } => {
                let result = self.kernel.submit(&input).await.map_err(HostError::from);
                let _ = resp.send(result);
            }
            ControlMsg::Drain { resp } => {
                let result = self
                    .kernel
                    .run_until_idle()
                    .await
                    .map_err(HostError::from);
                let _ = resp.send(result);
            }
            ControlMsg::Pause { resp } => {
                let _ = resp.send(self.kernel.pause().map_err(HostError::from));
            }
            ControlMsg::Resume { resp } => {
                let _ = resp.send(self.kernel.resume().map_err(HostError::from));
            }
            ControlMsg::HistoryTail { limit, resp } => {
                let entries = self.kernel.history();
                let start = entries.len().saturating_sub(limit);
                let _ = resp.send(entries[start..].to_vec());
            }
            ControlMsg::Snapshot { resp } => {
                let _ = resp.send(Box::new(self.kernel.state().clone()));
            }
            ControlMsg::JournalDump { resp } => {
                let _ = resp.send(self.kernel.store().actions().map_err(HostError::from));
            }
            ControlMsg::Shutdown { resp } => {
                let _ = resp.send(());
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Spawn the daemon on the current runtime.
pub fn spawn(kernel: Kernel) -> (JoinHandle<Result<(), HostError>>, HostHandle) {
    let (daemon, handle) = HostDaemon::new(kernel);
    (tokio::spawn(daemon.run()), handle)
}
