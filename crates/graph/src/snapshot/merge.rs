//! Combination of independently derived deltas into one snapshot.

use super::diff::Delta;
use super::op::{Op, Snapshot};
use super::types::GraphError;

/// Combine `layers` on top of `base` into a single snapshot.
///
/// Deltas are applied in listed order; if two deltas touch the same path
/// the later one wins. Callers are responsible for only submitting deltas
/// over disjoint concerns — the order is there for determinism, not
/// conflict resolution.
///
/// # Errors
///
/// [`GraphError::ForeignDelta`] if a delta was computed against a snapshot
/// that is neither `base` nor an ancestor on `base`'s own lineage. Like all
/// graph preconditions this is a compiler defect, not a user error.
pub fn merge(base: &Snapshot, layers: Vec<Delta>, name: impl Into<String>) -> Result<Snapshot, GraphError> {
  let name = name.into();
  for delta in &layers {
    let lower = delta.lower();
    if lower.id() != base.id() && !base.derives_from(lower) {
      return Err(GraphError::ForeignDelta {
        name: name.clone(),
        delta: delta.name().to_string(),
        base: base.id(),
      });
    }
  }
  Ok(Snapshot::from_op(Op::Merge {
    base: base.clone(),
    layers,
    name,
  }))
}

#[cfg(test)]
mod tests {
  use super::super::diff::diff;
  use super::*;
  use crate::snapshot::LayerOp;

  #[test]
  fn merge_flattens_base_then_deltas_in_order() {
    let base = Snapshot::source("img");
    let a = diff(&base, &base.exec("a"), "a").unwrap();
    let b = diff(&base, &base.exec("b"), "b").unwrap();

    let merged = merge(&base, vec![a, b], "combine").unwrap();
    let layers = merged.layers();
    assert_eq!(layers.len(), 3);
    assert!(matches!(&layers[1], LayerOp::Exec { command, .. } if command == "a"));
    assert!(matches!(&layers[2], LayerOp::Exec { command, .. } if command == "b"));
  }

  #[test]
  fn merge_accepts_deltas_against_an_ancestor_of_base() {
    let root = Snapshot::source("img");
    let base = root.exec("configure");
    let delta = diff(&root, &root.exec("independent"), "independent").unwrap();

    let merged = merge(&base, vec![delta], "combine").unwrap();
    assert_eq!(merged.layers().len(), 3);
  }

  #[test]
  fn merge_round_trips_a_single_diff() {
    let base = Snapshot::source("img").exec("setup");
    let output = base.exec("install").mkfile("/etc/conf", "x", 0o600);

    let delta = diff(&base, &output, "stage").unwrap();
    let merged = merge(&base, vec![delta], "combine").unwrap();

    assert_eq!(merged.layers(), output.layers());
  }

  #[test]
  fn merge_rejects_foreign_deltas() {
    let base = Snapshot::source("img");
    let foreign = Snapshot::source("img");
    let delta = diff(&foreign, &foreign.exec("x"), "foreign").unwrap();

    let err = merge(&base, vec![delta], "combine").unwrap_err();
    assert!(matches!(err, GraphError::ForeignDelta { .. }));
  }

  #[test]
  fn merge_tolerates_an_empty_delta_set() {
    let base = Snapshot::source("img");
    let merged = merge(&base, Vec::new(), "combine").unwrap();
    assert_eq!(merged.layers(), base.layers());
  }
}
