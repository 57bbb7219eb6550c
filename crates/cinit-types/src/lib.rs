//! Type catalog, initializer syntax model and resolved value trees.
//!
//! Everything in this crate is input or output data for the resolver:
//! - `catalog`: declared types (`Type`, `TypeId`, `TypeCatalog`)
//! - `syntax`: the parsed initializer (`InitNode`, `InitItem`, `Designator`,
//!   leaf `Expr`s) and declaration metadata (`StorageClass`, `Declaration`)
//! - `value`: the resolved value tree (`ResolvedValue`, `ScalarValue`)
//!
//! The catalog and syntax tree are produced upstream and never mutated here;
//! a `ResolvedValue` is created fresh per declaration by the resolver.

pub mod catalog;
pub use catalog::{ScalarKind, SeqLen, Type, TypeCatalog, TypeId, UnknownType};

pub mod syntax;
pub use syntax::{
    BinaryOp, Declaration, Designator, Expr, InitItem, InitNode, StorageClass, UnaryOp,
};

pub mod value;
pub use value::{ResolvedValue, ScalarValue};
