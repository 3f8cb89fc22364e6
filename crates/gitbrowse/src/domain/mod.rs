//! Domain types shared across the resolution pipeline.

pub mod errors;
pub mod model;
