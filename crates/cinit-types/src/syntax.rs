//! The parsed initializer and declaration metadata.
//!
//! The upstream parser produces this tree; the resolver consumes it
//! read-only. Leaf expressions are already parsed but not evaluated —
//! the resolver folds constant leaves itself and carries non-constant
//! leaves through to the resolved tree for later run-time evaluation.

use crate::catalog::TypeId;
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
}

/// A leaf initializer expression.
///
/// `Call` and `Ident` are the non-constant leaves: a function call has
/// side effects and an identifier names a run-time object read. Everything
/// else classifies as a compile-time constant (address-of a named object
/// is an address constant).
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    IntLit(i64),
    FloatLit(f64),
    BoolLit(bool),
    CharLit(u8),
    StrLit(String),
    NullPtr,
    EnumConst { name: String, value: i64 },
    NamedConst { name: String, value: Box<Expr> },
    AddressOf(String),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { callee: String, args: Vec<Expr> },
    Ident(String),
}

/// One step of a designator path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Designator {
    /// `.name` — valid against records and variants.
    Field(String),
    /// `[constant]` — valid against sequences.
    Index(i64),
}

/// A parsed initializer.
#[derive(Clone, Debug, PartialEq)]
pub enum InitNode {
    Leaf(Expr),
    Braced(Vec<InitItem>),
    /// `{}` — zero-initializes the whole current object (edition-gated).
    Empty,
}

/// One item of a braced list, optionally designated.
#[derive(Clone, Debug, PartialEq)]
pub struct InitItem {
    /// Empty for a positional item; otherwise a non-empty path.
    pub designators: SmallVec<[Designator; 2]>,
    pub value: InitNode,
}

impl InitItem {
    pub fn positional(value: InitNode) -> Self {
        Self {
            designators: SmallVec::new(),
            value,
        }
    }

    pub fn designated(path: impl IntoIterator<Item = Designator>, value: InitNode) -> Self {
        Self {
            designators: path.into_iter().collect(),
            value,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.designators.is_empty()
    }
}

/// Storage class of the declaration being resolved.
///
/// Static and thread-affine storage require every leaf initializer to be
/// a compile-time constant; automatic storage accepts any expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageClass {
    Automatic,
    Static,
    ThreadAffine,
}

impl StorageClass {
    pub fn requires_constant(self) -> bool {
        matches!(self, StorageClass::Static | StorageClass::ThreadAffine)
    }

    /// Whether an uninitialized declaration of this class still has a
    /// defined (all-zero) initial value.
    pub fn zero_initialized_by_default(self) -> bool {
        self.requires_constant()
    }
}

/// The declaration whose initializer is being resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub ty: TypeId,
    pub storage: StorageClass,
    /// False for a re-reference to storage defined elsewhere; supplying an
    /// initializer for such a declaration is a linkage conflict.
    pub defining: bool,
}

impl Declaration {
    pub fn defining(ty: TypeId, storage: StorageClass) -> Self {
        Self {
            ty,
            storage,
            defining: true,
        }
    }

    pub fn external(ty: TypeId, storage: StorageClass) -> Self {
        Self {
            ty,
            storage,
            defining: false,
        }
    }
}
