//! apptrack: per-app screen time from OS usage exports

pub mod cli;
pub mod services;
pub mod sources;
pub mod types;
