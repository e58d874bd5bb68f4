//! CLI command implementations.

pub mod flush;
pub mod seed;
