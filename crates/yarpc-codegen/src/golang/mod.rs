//! Go backend.
//!
//! Produces a single `<package>.yarp.go` file targeting the
//! `github.com/libyarp/yarp` runtime.

pub mod format;
mod generator;
mod types;

pub use format::format_source;
pub use generator::{GoBackend, RUNTIME_IMPORT};
pub use types::{GoSyntax, streamer_name};
