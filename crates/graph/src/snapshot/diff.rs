//! Delta extraction between derived snapshots.

use super::op::{LayerOp, Snapshot};
use super::types::GraphError;

/// The filesystem changes introduced by one stage, relative to a fixed
/// lower snapshot.
///
/// Deltas are named for observability and are the unit combined by
/// [`merge`](super::merge). Construct them with [`diff`]; the extracted op
/// chain is fixed at construction time.
#[derive(Debug, Clone)]
pub struct Delta {
  name: String,
  lower: Snapshot,
  upper: Snapshot,
  ops: Vec<LayerOp>,
}

impl Delta {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The snapshot this delta was computed against.
  pub fn lower(&self) -> &Snapshot {
    &self.lower
  }

  /// The derived snapshot whose changes this delta carries.
  pub fn upper(&self) -> &Snapshot {
    &self.upper
  }

  /// The extracted ops, lower-exclusive through upper-inclusive.
  pub fn ops(&self) -> &[LayerOp] {
    &self.ops
  }

  /// Whether the stage changed nothing.
  pub fn is_empty(&self) -> bool {
    self.ops.is_empty()
  }
}

/// Compute the incremental change set between `input` and a snapshot
/// derived from it.
///
/// The derivation is authoritative: ops are extracted mechanically from the
/// recorded lineage, file contents are never inspected. `name` is carried
/// for observability only. Diffing a snapshot against itself yields an
/// empty delta, which is how no-op stages fall out naturally.
///
/// # Errors
///
/// [`GraphError::NotDerived`] if `output` does not derive from `input`.
/// The orchestrator only diffs snapshots against their own ancestors, so
/// this indicates a compiler defect, not a user error.
pub fn diff(input: &Snapshot, output: &Snapshot, name: impl Into<String>) -> Result<Delta, GraphError> {
  let name = name.into();
  if !output.derives_from(input) {
    return Err(GraphError::NotDerived {
      name,
      lower: input.id(),
      upper: output.id(),
    });
  }

  // Derivation guarantees the input's layers are a prefix of the output's.
  let mut ops = output.layers();
  let ops = ops.split_off(input.layers().len());

  Ok(Delta {
    name,
    lower: input.clone(),
    upper: output.clone(),
    ops,
  })
}
