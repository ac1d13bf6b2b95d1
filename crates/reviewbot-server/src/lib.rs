//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod handlers;
mod health;
pub mod metrics;
pub mod server;

pub use errors::{Result, ServerError};
