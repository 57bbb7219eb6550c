//! Positions of initializer items.
//!
//! An initializer is a tree of braced lists; an item is addressed by the
//! path of item indices leading to it from the outermost list. `ItemPos`
//! is that path. It is the only location currency diagnostics use: the
//! surrounding front end owns source spans, the resolver only knows the
//! tree it was handed.

use smallvec::SmallVec;
use std::fmt;

/// Path of item indices through nested braced lists, outermost first.
///
/// The root position (empty path) denotes the declaration itself rather
/// than any one item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemPos(SmallVec<[u32; 4]>);

impl ItemPos {
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of the `index`-th item inside the list at `self`.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index as u32);
        Self(path)
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for ItemPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<declaration>");
        }
        write!(f, "item ")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}
