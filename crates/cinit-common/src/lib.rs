//! Common types and utilities for the cinit initializer resolver.
//!
//! This crate provides foundational types used across all cinit crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, code tables)
//! - Initializer item positions (`ItemPos`)
//! - Centralized limits and thresholds

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};

// Positions of items within an initializer tree
pub mod pos;
pub use pos::ItemPos;

// Centralized limits and thresholds
pub mod limits;
