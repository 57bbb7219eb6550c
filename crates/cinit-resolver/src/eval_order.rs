//! The evaluation-order contract.
//!
//! The engine guarantees that every leaf expression it commits is
//! evaluated exactly once over the whole resolution, but it makes no
//! guarantee about the relative order of evaluation among sibling leaves
//! of one list. This is deliberate nondeterminism, not a bug: consumers
//! and test suites may rely on exactly-once evaluation and on the
//! deterministic final value of every sub-object (the last write in list
//! order wins), never on left-to-right evaluation. A leaf whose value is
//! later overridden may have its evaluation skipped, but is never
//! evaluated twice.
//!
//! The contract is observable through [`EvalSink`]: the engine notifies
//! the sink once per committed leaf expression.

use cinit_common::ItemPos;
use rustc_hash::FxHashMap;

/// Observer of leaf-expression evaluations.
pub trait EvalSink {
    fn on_leaf_evaluated(&mut self, pos: &ItemPos);
}

/// Sink that ignores all notifications; the default.
#[derive(Default)]
pub struct NullSink;

impl EvalSink for NullSink {
    fn on_leaf_evaluated(&mut self, _pos: &ItemPos) {}
}

/// Sink that counts evaluations per item position, for asserting the
/// exactly-once guarantee in tests.
#[derive(Default)]
pub struct CountingSink {
    pub counts: FxHashMap<ItemPos, u32>,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pos: &ItemPos) -> u32 {
        self.counts.get(pos).copied().unwrap_or(0)
    }

    pub fn all_exactly_once(&self) -> bool {
        self.counts.values().all(|&c| c == 1)
    }
}

impl EvalSink for CountingSink {
    fn on_leaf_evaluated(&mut self, pos: &ItemPos) {
        *self.counts.entry(pos.clone()).or_insert(0) += 1;
    }
}
