//! Designator path resolution.
//!
//! `navigate` walks a type by a designator path and produces the location
//! handle the engine writes through: the child-index trail from the base
//! object and the type at each step. It is purely type-level — no value
//! tree is touched — so navigation and the engine's slot bookkeeping stay
//! independently testable.

use cinit_common::limits::MAX_INFERRED_SEQUENCE_LEN;
use cinit_types::{Designator, SeqLen, Type, TypeCatalog, TypeId};
use smallvec::SmallVec;

/// Child-index path from the root of a value tree: element index for
/// sequences, field index for records, member index for variants.
pub type ValuePath = SmallVec<[u32; 8]>;

/// One resolved designator step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavStep {
    /// Child index within the enclosing object.
    pub child: u32,
    /// Type of the stepped-into sub-object.
    pub ty: TypeId,
}

/// The resolved location of a designator path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub base: TypeId,
    pub steps: SmallVec<[NavStep; 4]>,
}

impl Navigation {
    /// Type of the innermost addressed sub-object.
    pub fn target(&self) -> TypeId {
        self.steps.last().map_or(self.base, |s| s.ty)
    }

    /// Absolute value path of the target, given the base object's path.
    pub fn target_path(&self, base_path: &ValuePath) -> ValuePath {
        let mut path = base_path.clone();
        path.extend(self.steps.iter().map(|s| s.child));
        path
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathErrorKind {
    UnknownType(TypeId),
    UnknownField(String),
    /// The step cannot be applied to the object kind it landed on.
    KindMismatch(String),
    OutOfBound { index: i64, bound: u64 },
}

/// A malformed designator path, with the index of the offending step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathError {
    pub step: usize,
    pub kind: PathErrorKind,
}

impl PathError {
    fn at(step: usize, kind: PathErrorKind) -> Self {
        Self { step, kind }
    }
}

fn describe(step: &Designator) -> String {
    match step {
        Designator::Field(name) => format!(".{name}"),
        Designator::Index(i) => format!("[{i}]"),
    }
}

/// Resolve a designator path against `base`, left to right.
///
/// Field steps match records and variants (variant members are addressable
/// by name); index steps match sequences. An index into a known-length
/// sequence must be within the declared bound; an unknown-length sequence
/// accepts any non-negative index up to the inferred-length cap and may
/// extend the eventually-inferred length.
pub fn navigate(
    catalog: &TypeCatalog,
    base: TypeId,
    path: &[Designator],
) -> Result<Navigation, PathError> {
    let mut nav = Navigation {
        base,
        steps: SmallVec::new(),
    };
    let mut current = base;
    for (i, step) in path.iter().enumerate() {
        if i >= cinit_common::limits::MAX_DESIGNATOR_DEPTH {
            return Err(PathError::at(i, PathErrorKind::KindMismatch(describe(step))));
        }
        let ty = catalog
            .resolve(current)
            .map_err(|e| PathError::at(i, PathErrorKind::UnknownType(e.0)))?;
        let resolved = match (step, ty) {
            (Designator::Field(name), Type::Record { fields }) => fields
                .get_index_of(name.as_str())
                .map(|idx| (idx as u32, fields[idx]))
                .ok_or_else(|| PathError::at(i, PathErrorKind::UnknownField(name.clone())))?,
            (Designator::Field(name), Type::Variant { members }) => members
                .get_index_of(name.as_str())
                .map(|idx| (idx as u32, members[idx]))
                .ok_or_else(|| PathError::at(i, PathErrorKind::UnknownField(name.clone())))?,
            (Designator::Index(index), Type::Sequence { elem, len }) => {
                let bound = match len {
                    SeqLen::Known(n) => *n,
                    SeqLen::Unknown => MAX_INFERRED_SEQUENCE_LEN,
                    // Runtime-length sequences are rejected before any
                    // navigation; treat a stray one as a malformed step.
                    SeqLen::Runtime => {
                        return Err(PathError::at(
                            i,
                            PathErrorKind::KindMismatch(describe(step)),
                        ));
                    }
                };
                if *index < 0 || *index as u64 >= bound {
                    return Err(PathError::at(
                        i,
                        PathErrorKind::OutOfBound {
                            index: *index,
                            bound,
                        },
                    ));
                }
                (*index as u32, *elem)
            }
            _ => {
                return Err(PathError::at(i, PathErrorKind::KindMismatch(describe(step))));
            }
        };
        nav.steps.push(NavStep {
            child: resolved.0,
            ty: resolved.1,
        });
        current = resolved.1;
    }
    Ok(nav)
}
