//! The "current object" frame stack.
//!
//! Un-designated items are applied against the top frame's next implicit
//! slot. Frames are pushed when a braced list opens an aggregate, when
//! brace elision descends into an aggregate child, and for each
//! intermediate step of a designator path; they are popped when a frame's
//! slot space is exhausted. The stack is owned by one list resolution and
//! never outlives it.

use crate::path::ValuePath;
use cinit_types::{SeqLen, Type, TypeCatalog, TypeId, UnknownType};

/// How many implicit slots a frame has.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// Unknown-length sequence: slots never run out.
    Open,
}

/// One level of "current object" context.
#[derive(Clone, Debug)]
pub struct Frame {
    pub ty: TypeId,
    /// Value path of this frame's object from the declaration root.
    pub base: ValuePath,
    /// Index of the child the next un-designated item targets.
    pub next_slot: usize,
    pub arity: Arity,
}

impl Frame {
    pub fn new(catalog: &TypeCatalog, ty: TypeId, base: ValuePath) -> Result<Self, UnknownType> {
        let arity = match catalog.resolve(ty)? {
            // A scalar accepts a single brace-enclosed initializer.
            Type::Scalar(_) => Arity::Fixed(1),
            Type::Sequence { len, .. } => match len {
                SeqLen::Known(n) => Arity::Fixed(*n as usize),
                SeqLen::Unknown => Arity::Open,
                SeqLen::Runtime => Arity::Fixed(0),
            },
            Type::Record { fields } => Arity::Fixed(fields.len()),
            // A bare value targets the first-declared member only.
            Type::Variant { .. } => Arity::Fixed(1),
            Type::Incomplete { .. } => Arity::Fixed(0),
        };
        Ok(Self {
            ty,
            base,
            next_slot: 0,
            arity,
        })
    }

    pub fn exhausted(&self) -> bool {
        match self.arity {
            Arity::Fixed(n) => self.next_slot >= n,
            Arity::Open => false,
        }
    }

    /// Type and value path of the child at `slot`.
    ///
    /// For a scalar frame the single slot is the scalar itself, so the
    /// child path equals the frame's own path.
    pub fn child(
        &self,
        catalog: &TypeCatalog,
        slot: usize,
    ) -> Result<(TypeId, ValuePath), UnknownType> {
        match catalog.resolve(self.ty)? {
            Type::Scalar(_) => Ok((self.ty, self.base.clone())),
            Type::Sequence { elem, .. } => {
                let mut path = self.base.clone();
                path.push(slot as u32);
                Ok((*elem, path))
            }
            Type::Record { fields } => {
                let mut path = self.base.clone();
                path.push(slot as u32);
                Ok((fields[slot], path))
            }
            Type::Variant { members } => {
                let mut path = self.base.clone();
                path.push(0);
                Ok((members[0], path))
            }
            Type::Incomplete { .. } => Err(UnknownType(self.ty)),
        }
    }
}
