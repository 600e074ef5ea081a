//! Marshaling snapshots into portable plan definitions.
//!
//! The executing engine consumes a dependency-ordered list of plan ops.
//! Diff and merge stay explicit ops in the marshaled form, so the engine
//! still sees which deltas are independent and can cache or realize them in
//! parallel; ops are content-addressed so equal subgraphs marshal to equal
//! digests across runs.

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use stratum_platform::Platform;

use crate::snapshot::{LayerOp, NodeId, Op, Snapshot};
use crate::util::digest::{OpDigest, digest_parts};

/// Errors that can occur while marshaling a plan definition.
#[derive(Debug, Error)]
pub enum MarshalError {
  #[error("failed to serialize plan op: {0}")]
  Serialize(#[from] serde_json::Error),

  /// Snapshots are created append-only, so a cycle in the op graph
  /// indicates a compiler defect.
  #[error("op graph contains a cycle (compiler defect)")]
  Cycle,
}

/// Payload of one marshaled plan op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanOpKind {
  /// A primitive filesystem transformation.
  Layer(LayerOp),
  /// The incremental change set between inputs `[lower, upper]`.
  Diff,
  /// The union of a base (first input) and diff ops, applied in order.
  Merge,
}

/// One marshaled plan operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOp {
  pub digest: OpDigest,
  pub kind: PlanOpKind,
  /// Digests of input ops, in application order.
  pub inputs: Vec<OpDigest>,
  /// Observability name, when the op carries one.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

/// A portable, serializable build plan for one target platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
  pub platform: Platform,
  /// Plan ops in dependency order; the last op is the compiled snapshot.
  pub ops: Vec<PlanOp>,
}

impl Definition {
  /// Serialize the definition for the executing engine.
  pub fn to_bytes(&self) -> Result<Vec<u8>, MarshalError> {
    Ok(serde_json::to_vec(self)?)
  }
}

struct PlanNode {
  kind: PlanOpKind,
  name: Option<String>,
  inputs: Vec<NodeIndex>,
}

/// Marshal a snapshot graph into a [`Definition`] targeting `platform`.
pub fn marshal(snapshot: &Snapshot, platform: Platform) -> Result<Definition, MarshalError> {
  let mut graph: DiGraph<PlanNode, ()> = DiGraph::new();
  let mut seen: HashMap<NodeId, NodeIndex> = HashMap::new();
  visit(snapshot, &mut graph, &mut seen);

  let order = toposort(&graph, None).map_err(|_| MarshalError::Cycle)?;

  let mut digests: HashMap<NodeIndex, OpDigest> = HashMap::new();
  let mut emitted: HashSet<OpDigest> = HashSet::new();
  let mut ops = Vec::with_capacity(order.len());
  for index in order {
    let node = &graph[index];
    let inputs: Vec<OpDigest> = node.inputs.iter().map(|input| digests[input].clone()).collect();
    let payload = serde_json::to_string(&node.kind)?;
    let digest = digest_parts(&payload, &inputs);
    digests.insert(index, digest.clone());

    // Identical subgraphs collapse to one op; inputs reference digests, so
    // later ops still resolve.
    if emitted.insert(digest.clone()) {
      ops.push(PlanOp {
        digest,
        kind: node.kind.clone(),
        inputs,
        name: node.name.clone(),
      });
    }
  }

  debug!(ops = ops.len(), platform = %platform, "marshaled plan definition");
  Ok(Definition { platform, ops })
}

fn visit(
  snapshot: &Snapshot,
  graph: &mut DiGraph<PlanNode, ()>,
  seen: &mut HashMap<NodeId, NodeIndex>,
) -> NodeIndex {
  if let Some(&index) = seen.get(&snapshot.id()) {
    return index;
  }

  let index = match snapshot.op() {
    Op::Layer { parent, op } => {
      let inputs: Vec<NodeIndex> = parent
        .as_ref()
        .map(|parent| visit(parent, graph, seen))
        .into_iter()
        .collect();
      add_node(
        graph,
        PlanNode {
          kind: PlanOpKind::Layer(op.clone()),
          name: None,
          inputs,
        },
      )
    }
    Op::Merge { base, layers, name } => {
      let mut inputs = vec![visit(base, graph, seen)];
      for delta in layers {
        let lower = visit(delta.lower(), graph, seen);
        let upper = visit(delta.upper(), graph, seen);
        let diff_index = add_node(
          graph,
          PlanNode {
            kind: PlanOpKind::Diff,
            name: Some(delta.name().to_string()),
            inputs: vec![lower, upper],
          },
        );
        inputs.push(diff_index);
      }
      add_node(
        graph,
        PlanNode {
          kind: PlanOpKind::Merge,
          name: Some(name.clone()),
          inputs,
        },
      )
    }
  };

  seen.insert(snapshot.id(), index);
  index
}

fn add_node(graph: &mut DiGraph<PlanNode, ()>, node: PlanNode) -> NodeIndex {
  let inputs = node.inputs.clone();
  let index = graph.add_node(node);
  for input in inputs {
    graph.add_edge(input, index, ());
  }
  index
}
