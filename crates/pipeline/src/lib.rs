//! Clover Pipeline - Bulk data lifecycle for the Clover Market store.
//!
//! Two entry points operate on the shared document store:
//!
//! - [`seed::run_seed`] - load per-entity JSON seed files, validate and
//!   enrich them (order expansion, address extraction), and upsert them into
//!   the store in dependency order with idempotent batched writes.
//! - [`flush::run_flush`] - selectively mass-delete the storefront
//!   collections, preserving an explicit set of user ids and keeping the
//!   dependent collections consistent with it.
//!
//! Everything else in this crate is a stateless helper invoked by those two
//! orchestrators; data flows strictly downward (loader -> indexes ->
//! expanders -> writer), never cyclically.
//!
//! # Consistency
//!
//! Batched writes commit sequentially with no cross-chunk rollback: a chunk
//! that has committed stays committed even when a later chunk fails. That is
//! a deliberate tradeoff for a seed/flush utility - both pipelines are
//! idempotent, so the recovery path is to re-run them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod flush;
pub mod seed;

pub use config::PipelineConfig;
pub use error::{PipelineError, RefKind};
