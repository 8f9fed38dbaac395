//! Application Layer
//!
//! CLI and configuration management for the `graph-simp` binary.

pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::Config;
