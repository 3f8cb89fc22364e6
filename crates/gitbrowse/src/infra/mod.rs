//! Infrastructure adapters for the git CLI, config, and host integrations.

pub mod browser;
pub mod clipboard;
pub mod config;
pub mod shell;
