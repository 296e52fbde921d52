//! Long-lived host around the kernel: a daemon task owning the kernel, a
//! control channel with oneshot responders, and environment-driven
//! configuration.

pub mod config;
pub mod daemon;
pub mod error;

pub use config::HostConfig;
pub use daemon::{ControlMsg, HostDaemon, HostHandle, spawn};
pub use error::HostError;
