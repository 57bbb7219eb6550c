//! Parallel resolution of independent declarations.
//!
//! Distinct declarations share no mutable state and the catalog is
//! read-only, so a batch can fan out across worker threads freely. Each
//! declaration is atomic: it contributes either a value tree or its own
//! diagnostics, never a partial result, and one declaration's failure
//! never aborts its siblings.

use crate::engine::{Resolution, Resolver};
use crate::options::ResolverOptions;
use cinit_common::Diagnostic;
use cinit_types::{Declaration, InitNode, TypeCatalog};
use rayon::prelude::*;

/// Outcome of one declaration in a batch.
///
/// `None` means the declaration has no defined initial value (automatic
/// storage without an initializer).
pub type BatchOutcome = Option<Result<Resolution, Vec<Diagnostic>>>;

pub fn resolve_batch(
    catalog: &TypeCatalog,
    options: &ResolverOptions,
    declarations: &[(Declaration, Option<InitNode>)],
) -> Vec<BatchOutcome> {
    declarations
        .par_iter()
        .map(|(decl, init)| {
            let resolver = Resolver::with_options(catalog, options.clone());
            match init {
                Some(node) => Some(resolver.resolve(decl, node)),
                None => resolver.resolve_uninitialized(decl),
            }
        })
        .collect()
}
