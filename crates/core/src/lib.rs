//! Clover Core - Shared types library.
//!
//! This crate provides the entity types and money primitives used across all
//! Clover Market components:
//! - `pipeline` - Bulk seed and flush pipelines over the document store
//! - `store` - Document-store bindings
//! - `cli` - Command-line tools for seeding and flushing
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no store
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`entities`] - Stored document shapes for every seeded collection
//! - [`money`] - Deterministic monetary rounding and aggregation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod money;

pub use entities::*;
