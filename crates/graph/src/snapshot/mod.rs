//! Filesystem snapshots, deltas, and their composition.
//!
//! A [`Snapshot`] is an immutable handle over "a filesystem state reachable
//! by applying a sequence of declared transformations". Snapshots are always
//! derived, never mutated; every node records the operation that produced it
//! and the snapshot it derives from, so derivation lineage is checkable at
//! runtime rather than assumed.
//!
//! [`diff`] extracts the change set one stage introduced; [`merge`] combines
//! independently derived change sets over a common base. Both verify their
//! lineage preconditions and fail with [`GraphError`] when violated — those
//! failures indicate compiler defects, never user errors.

mod diff;
mod merge;
mod op;
mod types;

pub use diff::{Delta, diff};
pub use merge::merge;
pub use op::{CacheMount, LayerOp, Op, Snapshot};
pub use types::{GraphError, NodeId};
