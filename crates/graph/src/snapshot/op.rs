//! Snapshot handles and the operations that derive them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::diff::Delta;
use super::types::NodeId;

/// A persistent cache directory mounted during an exec op.
///
/// Cache mounts survive across builds under a caller-chosen id, so repeated
/// package installs hit warm caches in the executing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMount {
  pub id: String,
  pub target: String,
}

/// The payload of one primitive filesystem transformation.
///
/// This is the portable face of an op: it carries no snapshot references,
/// serializes deterministically, and two snapshots with equal payload
/// sequences describe the same filesystem state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerOp {
  /// Pull a base image.
  Source { image: String },
  /// Run a command.
  Exec {
    command: String,
    caches: Vec<CacheMount>,
  },
  /// Write a file.
  Mkfile {
    path: String,
    contents: String,
    mode: u32,
  },
  /// Set an environment variable.
  Env { name: String, value: String },
}

/// The operation that produced a snapshot.
#[derive(Debug)]
pub enum Op {
  /// A primitive transformation applied to an optional parent
  /// (`None` only for [`LayerOp::Source`], which starts a lineage).
  Layer {
    parent: Option<Snapshot>,
    op: LayerOp,
  },
  /// The union of a base snapshot and a set of deltas, applied in listed
  /// order.
  Merge {
    base: Snapshot,
    layers: Vec<Delta>,
    name: String,
  },
}

impl Op {
  /// The snapshot this op derives from along the primary lineage.
  pub fn primary_parent(&self) -> Option<&Snapshot> {
    match self {
      Op::Layer { parent, .. } => parent.as_ref(),
      Op::Merge { base, .. } => Some(base),
    }
  }
}

/// An immutable handle on one filesystem state.
///
/// Cloning a snapshot clones the handle, not the state: both handles refer
/// to the same node and compare equal by [`NodeId`].
#[derive(Debug, Clone)]
pub struct Snapshot {
  inner: Arc<Node>,
}

#[derive(Debug)]
struct Node {
  id: NodeId,
  op: Op,
}

impl Snapshot {
  pub(crate) fn from_op(op: Op) -> Self {
    Self {
      inner: Arc::new(Node {
        id: NodeId::next(),
        op,
      }),
    }
  }

  /// Start a new lineage from a base image.
  pub fn source(image: impl Into<String>) -> Self {
    Self::from_op(Op::Layer {
      parent: None,
      op: LayerOp::Source { image: image.into() },
    })
  }

  /// Derive a snapshot by running a command.
  pub fn exec(&self, command: impl Into<String>) -> Self {
    self.exec_cached(command, Vec::new())
  }

  /// Derive a snapshot by running a command with persistent cache mounts.
  pub fn exec_cached(&self, command: impl Into<String>, caches: Vec<CacheMount>) -> Self {
    Self::from_op(Op::Layer {
      parent: Some(self.clone()),
      op: LayerOp::Exec {
        command: command.into(),
        caches,
      },
    })
  }

  /// Derive a snapshot by writing a file.
  pub fn mkfile(&self, path: impl Into<String>, contents: impl Into<String>, mode: u32) -> Self {
    Self::from_op(Op::Layer {
      parent: Some(self.clone()),
      op: LayerOp::Mkfile {
        path: path.into(),
        contents: contents.into(),
        mode,
      },
    })
  }

  /// Derive a snapshot by setting an environment variable.
  pub fn env(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
    Self::from_op(Op::Layer {
      parent: Some(self.clone()),
      op: LayerOp::Env {
        name: name.into(),
        value: value.into(),
      },
    })
  }

  pub fn id(&self) -> NodeId {
    self.inner.id
  }

  pub fn op(&self) -> &Op {
    &self.inner.op
  }

  /// Whether `ancestor` lies on this snapshot's primary lineage.
  ///
  /// The primary lineage follows each op's single derivation parent (a
  /// merge derives from its base); a snapshot derives from itself.
  pub fn derives_from(&self, ancestor: &Snapshot) -> bool {
    let mut current = self.clone();
    loop {
      if current.id() == ancestor.id() {
        return true;
      }
      let Some(parent) = current.op().primary_parent().cloned() else {
        return false;
      };
      current = parent;
    }
  }

  /// The canonical effective layer sequence of this snapshot.
  ///
  /// Merges flatten to their base's layers followed by each delta's ops in
  /// listed order. Two snapshots with equal layer sequences describe the
  /// same filesystem state, whatever shape their graphs take.
  pub fn layers(&self) -> Vec<LayerOp> {
    let mut out = Vec::new();
    self.collect_layers(&mut out);
    out
  }

  fn collect_layers(&self, out: &mut Vec<LayerOp>) {
    match self.op() {
      Op::Layer { parent, op } => {
        if let Some(parent) = parent {
          parent.collect_layers(out);
        }
        out.push(op.clone());
      }
      Op::Merge { base, layers, .. } => {
        base.collect_layers(out);
        for delta in layers {
          out.extend_from_slice(delta.ops());
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn derivation_chain_collects_layers_in_order() {
    let snapshot = Snapshot::source("docker.io/library/ubuntu:20.04")
      .exec("apt-get update")
      .mkfile("/etc/motd", "hello", 0o644)
      .env("LANG", "C.UTF-8");

    let layers = snapshot.layers();
    assert_eq!(layers.len(), 4);
    assert!(matches!(&layers[0], LayerOp::Source { image } if image.ends_with("ubuntu:20.04")));
    assert!(matches!(&layers[1], LayerOp::Exec { command, .. } if command == "apt-get update"));
    assert!(matches!(&layers[2], LayerOp::Mkfile { path, .. } if path == "/etc/motd"));
    assert!(matches!(&layers[3], LayerOp::Env { name, .. } if name == "LANG"));
  }

  #[test]
  fn derives_from_walks_the_chain() {
    let base = Snapshot::source("img");
    let middle = base.exec("one");
    let top = middle.exec("two");

    assert!(top.derives_from(&base));
    assert!(top.derives_from(&middle));
    assert!(top.derives_from(&top));
    assert!(!base.derives_from(&top));
  }

  #[test]
  fn unrelated_lineages_do_not_derive() {
    let a = Snapshot::source("img");
    let b = Snapshot::source("img");
    assert!(!a.derives_from(&b));
    assert!(!b.derives_from(&a));
  }

  #[test]
  fn clones_share_identity() {
    let snapshot = Snapshot::source("img");
    let clone = snapshot.clone();
    assert_eq!(snapshot.id(), clone.id());
  }
}
