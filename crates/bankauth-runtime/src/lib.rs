//! # bankauth-runtime
//!
//! Process-level plumbing shared by the server binary: the
//! [`Orchestrator`] that supervises every [`ServiceUnit`] under one
//! cancellation token, the OS signal bridge that fires that token, and
//! tracing subscriber setup.
//!
//! [`ServiceUnit`]: bankauth_core::traits::ServiceUnit

pub mod logging;
pub mod orchestrator;
pub mod signal;

pub use logging::{LogFormat, init_logging};
pub use orchestrator::Orchestrator;
pub use signal::{cancel_on_signal, wait_for_signal};
