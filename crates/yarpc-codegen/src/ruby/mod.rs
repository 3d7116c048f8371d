//! Ruby backend.
//!
//! Targets the `yarp` Ruby gem: messages become `Yarp::Structure`
//! subclasses, services become a `Yarp::Client` subclass plus an abstract
//! server class with registration glue.

mod check;
pub mod concat;
mod generator;
mod types;

pub use check::check_source;
pub use generator::RubyBackend;
pub use types::{RubySyntax, streamer_class};
