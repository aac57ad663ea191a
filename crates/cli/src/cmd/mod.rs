//! CLI command implementations

pub mod config;
pub mod history;
pub mod latest;
pub mod show;
pub mod status;
