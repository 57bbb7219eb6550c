//! The type catalog: read-only descriptions of declared types.
//!
//! Types are interned into a `TypeCatalog` by the upstream declaration
//! processor and referenced by `TypeId` everywhere else. The catalog is
//! append-only while being built and immutable once resolution starts, so
//! it can be shared by reference across any number of concurrent
//! resolutions.

use indexmap::IndexMap;
use std::fmt;

/// Identifier of an interned type.
///
/// `TypeId(0)` is the invalid sentinel; valid ids start at 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const INVALID: Self = Self(0);

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Scalar type kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarKind {
    Bool,
    /// Character representation: 8 bits, values 0..=255.
    Char,
    Int {
        bits: u8,
        signed: bool,
    },
    Float {
        bits: u8,
    },
    Pointer,
    /// Enumerated type with its named constants in declaration order.
    Enum {
        members: Vec<(String, i64)>,
    },
}

impl ScalarKind {
    /// Whether a quoted string literal may initialize a sequence of this
    /// kind element-by-element.
    pub fn is_char_like(&self) -> bool {
        matches!(self, ScalarKind::Char | ScalarKind::Int { bits: 8, .. })
    }
}

/// Declared length of a sequence type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeqLen {
    Known(u64),
    /// Length to be inferred from the initializer (`int a[] = ...`).
    Unknown,
    /// Length determined at run time; such an object cannot be initialized.
    Runtime,
}

/// A declared type.
///
/// Sequences, records and variants are aggregates; scalars are not.
/// `Incomplete` stands for a forward-declared record whose definition never
/// arrived; it has no sub-objects and cannot be initialized.
#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Scalar(ScalarKind),
    Sequence {
        elem: TypeId,
        len: SeqLen,
    },
    Record {
        fields: IndexMap<String, TypeId>,
    },
    Variant {
        members: IndexMap<String, TypeId>,
    },
    Incomplete {
        name: String,
    },
}

impl Type {
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Type::Sequence { .. } | Type::Record { .. } | Type::Variant { .. }
        )
    }
}

/// Lookup failure for a `TypeId` the catalog has never issued.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnknownType(pub TypeId);

/// Append-only store of declared types.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    types: Vec<Type>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, ty: Type) -> TypeId {
        self.types.push(ty);
        TypeId(self.types.len() as u32)
    }

    pub fn resolve(&self, id: TypeId) -> Result<&Type, UnknownType> {
        if !id.is_valid() {
            return Err(UnknownType(id));
        }
        self.types.get(id.0 as usize - 1).ok_or(UnknownType(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // Convenience constructors, used by upstream producers and tests.

    pub fn boolean(&mut self) -> TypeId {
        self.intern(Type::Scalar(ScalarKind::Bool))
    }

    pub fn char_(&mut self) -> TypeId {
        self.intern(Type::Scalar(ScalarKind::Char))
    }

    pub fn int32(&mut self) -> TypeId {
        self.intern(Type::Scalar(ScalarKind::Int {
            bits: 32,
            signed: true,
        }))
    }

    pub fn float64(&mut self) -> TypeId {
        self.intern(Type::Scalar(ScalarKind::Float { bits: 64 }))
    }

    pub fn pointer(&mut self) -> TypeId {
        self.intern(Type::Scalar(ScalarKind::Pointer))
    }

    pub fn enumeration(&mut self, members: &[(&str, i64)]) -> TypeId {
        self.intern(Type::Scalar(ScalarKind::Enum {
            members: members
                .iter()
                .map(|(n, v)| (n.to_string(), *v))
                .collect(),
        }))
    }

    pub fn sequence(&mut self, elem: TypeId, len: SeqLen) -> TypeId {
        self.intern(Type::Sequence { elem, len })
    }

    pub fn record(&mut self, fields: &[(&str, TypeId)]) -> TypeId {
        self.intern(Type::Record {
            fields: fields.iter().map(|(n, t)| (n.to_string(), *t)).collect(),
        })
    }

    pub fn variant(&mut self, members: &[(&str, TypeId)]) -> TypeId {
        self.intern(Type::Variant {
            members: members.iter().map(|(n, t)| (n.to_string(), *t)).collect(),
        })
    }

    pub fn incomplete(&mut self, name: &str) -> TypeId {
        self.intern(Type::Incomplete {
            name: name.to_string(),
        })
    }
}
