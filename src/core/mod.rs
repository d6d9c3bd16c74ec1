//! Core module - Contains the shared data structures and utilities
//!
//! This module provides:
//! - Per-entry report model (ReportItem, CleanReport)
//! - Rendering functions for different output formats
//! - Common utilities

pub mod model;
pub mod render;
pub mod util;
