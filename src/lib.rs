//! Scorecard core library.
//!
//! This crate exposes programmatic APIs for aggregating heterogeneous
//! JSON audit report artifacts into a normalized issue model, composite
//! 0-100 health scores per category, and filterable/sortable/paginated
//! issue views.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `loader`: Artifact probe and fault-tolerant parallel loading.
//! - `normalize`: Producer-specific schemas into the canonical model.
//! - `classify`: Severity reclassification into the 4-level taxonomy.
//! - `score`: Composite scoring with precomputed-summary precedence.
//! - `query`: Per-category search/sort/pagination view state.
//! - `models`: Canonical data model and raw artifact schemas.
//! - `output`: Human/JSON printers for report/scores/issues.
//! - `utils`: Supporting helpers.
pub mod classify;
pub mod cli;
pub mod config;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod output;
pub mod query;
pub mod score;
pub mod utils;
