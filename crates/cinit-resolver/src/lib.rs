//! Initializer resolution: computes the final initial value of every
//! sub-object of a declared object from a partial, designated and possibly
//! brace-elided initializer.
//!
//! The entry point is [`Resolver`]. It consumes a read-only
//! [`cinit_types::TypeCatalog`] and, per declaration, an initializer tree,
//! and produces either a [`Resolution`] (a value tree shaped exactly like
//! the declared type) or an ordered list of diagnostics. One declaration's
//! failure never affects another; [`batch::resolve_batch`] resolves many
//! declarations in parallel over the shared catalog.

pub mod const_eval;
pub mod engine;
pub mod eval_order;
pub mod frames;
pub mod options;
pub mod path;

pub mod batch;

pub use engine::{Resolution, Resolver};
pub use eval_order::{CountingSink, EvalSink, NullSink};
pub use options::{Edition, ResolverOptions};
pub use path::{Navigation, PathError, ValuePath};
