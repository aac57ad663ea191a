//! Fingertrail daemon and inspection commands

pub mod cmd;
pub mod config;
pub mod daemon;
pub mod server;
pub mod util;
