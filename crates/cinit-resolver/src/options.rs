//! Resolver configuration.

/// Language edition the initializer syntax was written against.
///
/// The only behavioral difference the resolver cares about is whether the
/// empty braced form `= {}` exists at all; earlier editions require at
/// least one item between braces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Edition {
    C99,
    C11,
    C23,
}

impl Edition {
    pub fn allows_empty_braces(self) -> bool {
        self >= Edition::C23
    }
}

#[derive(Clone, Debug)]
pub struct ResolverOptions {
    pub edition: Edition,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            edition: Edition::C23,
        }
    }
}

impl ResolverOptions {
    pub fn with_edition(edition: Edition) -> Self {
        Self { edition }
    }
}
