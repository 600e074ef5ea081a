//! Platform identifiers for the stratum build-graph compiler
//!
//! This crate provides the small, shared vocabulary of target identifiers:
//! - Operating system variants a build can target
//! - Login shells an environment can be configured with
//! - The platform (os/arch pair) a build plan is marshaled for

mod error;
mod os;
mod platform;
mod shell;

pub use error::PlatformError;
pub use os::Os;
pub use platform::Platform;
pub use shell::Shell;
