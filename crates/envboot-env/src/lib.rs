//! Virtual environment bootstrapper.
//!
//! Makes sure the project environment exists, then hands control to exactly
//! one child process (application or editor) running inside it. Every child
//! is described as an [`process::Invocation`] and executed through a
//! [`process::ProcessRunner`], so callers and tests can swap the executor.

pub mod bootstrap;
pub mod error;
pub mod interpreter;
pub mod launcher;
pub mod log;
pub mod process;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::{ensure_environment, sync_environment, EnsureOutcome, SyncReport};
pub use error::BootstrapError;
pub use launcher::{run_application, run_editor};
pub use process::{ExitOutcome, Invocation, ProcessRunner, SystemRunner};
pub use status::{inspect, EnvStatus};
