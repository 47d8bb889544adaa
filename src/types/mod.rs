//! Type definitions for apptrack

mod error;
mod usage;

pub use error::*;
pub use usage::*;
