//! Resolved value trees.
//!
//! A `ResolvedValue` is shaped exactly like its `Type`: one scalar leaf per
//! scalar, one element per sequence slot, one entry per record field, and a
//! single active member for a variant. The resolver creates the tree fully
//! zero-defaulted, overwrites the explicitly initialized leaves, and
//! publishes it immutable on success.

use crate::catalog::{ScalarKind, SeqLen, Type, TypeCatalog, TypeId, UnknownType};
use crate::syntax::Expr;

/// A resolved scalar leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Enumerated value by representation.
    Enum(i64),
    /// Null pointer sentinel.
    Null,
    /// Address constant: the address of a named object.
    Address(String),
    /// A non-constant expression committed under automatic storage,
    /// evaluated by the consumer at run time.
    Runtime(Expr),
}

/// The resolved initial value of an object.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    Scalar(ScalarValue),
    Sequence(Vec<ResolvedValue>),
    Record(Vec<ResolvedValue>),
    Variant {
        /// Index of the active member in declaration order.
        member: usize,
        value: Box<ResolvedValue>,
    },
}

impl ResolvedValue {
    /// The type-appropriate zero default: numeric zero, null pointer,
    /// false, recursive zero for aggregates, first member for variants.
    ///
    /// Sequences of unknown length start empty; the resolver grows them as
    /// items arrive and the final length is fixed only at the end of the
    /// pass. Incomplete types are rejected before any zero construction,
    /// so they default to an empty record here for totality.
    pub fn zero_of(catalog: &TypeCatalog, ty: TypeId) -> Result<ResolvedValue, UnknownType> {
        Ok(match catalog.resolve(ty)? {
            Type::Scalar(kind) => ResolvedValue::Scalar(ScalarValue::zero_of(kind)),
            Type::Sequence { elem, len } => {
                let n = match len {
                    SeqLen::Known(n) => *n as usize,
                    SeqLen::Unknown | SeqLen::Runtime => 0,
                };
                let mut elems = Vec::with_capacity(n);
                for _ in 0..n {
                    elems.push(ResolvedValue::zero_of(catalog, *elem)?);
                }
                ResolvedValue::Sequence(elems)
            }
            Type::Record { fields } => {
                let mut values = Vec::with_capacity(fields.len());
                for ty in fields.values() {
                    values.push(ResolvedValue::zero_of(catalog, *ty)?);
                }
                ResolvedValue::Record(values)
            }
            Type::Variant { members } => {
                let first = members
                    .values()
                    .next()
                    .copied()
                    .unwrap_or(TypeId::INVALID);
                let value = if first.is_valid() {
                    ResolvedValue::zero_of(catalog, first)?
                } else {
                    ResolvedValue::Record(Vec::new())
                };
                ResolvedValue::Variant {
                    member: 0,
                    value: Box::new(value),
                }
            }
            Type::Incomplete { .. } => ResolvedValue::Record(Vec::new()),
        })
    }

    /// Shape check: field count and order, sequence length and
    /// variant arity of the value match the type exactly. For sequences of
    /// unknown length any element count is accepted (the resolved length
    /// is the output that fixes it).
    pub fn shape_matches(&self, catalog: &TypeCatalog, ty: TypeId) -> bool {
        let Ok(resolved) = catalog.resolve(ty) else {
            return false;
        };
        match (self, resolved) {
            (ResolvedValue::Scalar(_), Type::Scalar(_)) => true,
            (ResolvedValue::Sequence(elems), Type::Sequence { elem, len }) => {
                let len_ok = match len {
                    SeqLen::Known(n) => elems.len() as u64 == *n,
                    SeqLen::Unknown => true,
                    SeqLen::Runtime => false,
                };
                len_ok && elems.iter().all(|e| e.shape_matches(catalog, *elem))
            }
            (ResolvedValue::Record(values), Type::Record { fields }) => {
                values.len() == fields.len()
                    && values
                        .iter()
                        .zip(fields.values())
                        .all(|(v, t)| v.shape_matches(catalog, *t))
            }
            (ResolvedValue::Variant { member, value }, Type::Variant { members }) => members
                .get_index(*member)
                .is_some_and(|(_, t)| value.shape_matches(catalog, *t)),
            _ => false,
        }
    }
}

impl ScalarValue {
    pub fn zero_of(kind: &ScalarKind) -> ScalarValue {
        match kind {
            ScalarKind::Bool => ScalarValue::Bool(false),
            ScalarKind::Char | ScalarKind::Int { .. } => ScalarValue::Int(0),
            ScalarKind::Float { .. } => ScalarValue::Float(0.0),
            ScalarKind::Pointer => ScalarValue::Null,
            // The zero-valued member if one is declared, else the
            // representation zero; both are Enum(0).
            ScalarKind::Enum { .. } => ScalarValue::Enum(0),
        }
    }
}
