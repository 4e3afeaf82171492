//! Preflight scripts: user-authored [Rhai](https://rhai.rs) run in an
//! isolated interpreter before an operation executes, able to read and
//! update the session environment, log, and ask the user for input.
//!
//! The interpreter runs on its own thread and talks to the host only through
//! the [`WorkerMessage`]/[`HostMessage`] protocol.

mod messages;
mod preflight_runner;
mod sandbox;

pub use messages::HostMessage;
pub use messages::LogLevel;
pub use messages::PreflightLog;
pub use messages::PreflightResult;
pub use messages::PreflightStatus;
pub use messages::WorkerMessage;
pub use preflight_runner::NonInteractive;
pub use preflight_runner::PreflightConfig;
pub use preflight_runner::PreflightError;
pub use preflight_runner::PreflightRunner;
pub use preflight_runner::PromptHandler;
