//! Identity and error types for the snapshot graph.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

/// Process-unique identity of one snapshot node.
///
/// Allocated from a generation counter when the node is created. Lineage
/// checks compare these ids instead of relying on object identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
  pub(crate) fn next() -> Self {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NodeId(NEXT.fetch_add(1, Ordering::Relaxed))
  }
}

impl std::fmt::Display for NodeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "snapshot#{}", self.0)
  }
}

/// Precondition violations in diff/merge composition.
///
/// These are always fatal: the orchestrator only composes snapshots along
/// their own lineage, so any of these indicates a compiler defect rather
/// than a problem with the input specification.
#[derive(Debug, Error)]
pub enum GraphError {
  /// `diff` was handed an output that does not derive from its input.
  #[error("diff {name:?}: {upper} does not derive from {lower} (compiler defect)")]
  NotDerived {
    name: String,
    lower: NodeId,
    upper: NodeId,
  },

  /// `merge` was handed a delta computed against a foreign base.
  #[error("merge {name:?}: delta {delta:?} was not computed on the lineage of base {base} (compiler defect)")]
  ForeignDelta {
    name: String,
    delta: String,
    base: NodeId,
  },
}
