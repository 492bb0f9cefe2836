pub mod config;
pub mod schedule;
pub mod server;
pub mod types;
