//! Application layer orchestrating the permalink resolution pipeline.

pub mod branch;
pub mod browse;
pub mod remote;
pub mod repo;
pub mod url;
