//! Centralized limits and thresholds for initializer resolution.
//!
//! Shared constants for recursion depths and capacity limits used across
//! the resolver. Centralizing them prevents duplicate definitions with
//! inconsistent values and documents the rationale for each limit.

/// Maximum number of steps in one designator path.
///
/// Designator paths are written by an upstream parser from source text
/// (`.a[3].b.c = ...`); real programs stay in single digits. The resolver
/// rejects longer paths as malformed rather than walking them.
pub const MAX_DESIGNATOR_DEPTH: usize = 64;

/// Maximum nesting depth of braced initializer lists.
///
/// The resolution engine recurses once per explicit brace level; this
/// bound keeps pathological inputs from overflowing the stack.
pub const MAX_BRACE_DEPTH: usize = 128;

/// Maximum length an index designator may give an unknown-length sequence.
///
/// `int a[] = { [1 << 40] = 1 }` would otherwise force the resolver to
/// materialize a value tree of that size. Indices beyond this limit are
/// reported as out of bounds.
pub const MAX_INFERRED_SEQUENCE_LEN: u64 = 1 << 24;
