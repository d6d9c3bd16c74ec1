//! Cleaner module - Package cache garbage collection
//!
//! Provides:
//! - classify: file-name classification inside package directories
//! - validate: structural rules for one package directory
//! - retention: the 30-day staleness policy
//! - scan: lazy enumeration of the cache root
//! - remove: idempotent best-effort deletion
//! - clean: the orchestrated clean pass

pub mod classify;
pub mod clean;
pub mod remove;
pub mod retention;
pub mod scan;
pub mod validate;
