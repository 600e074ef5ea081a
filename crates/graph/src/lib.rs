//! stratum-graph: the build-graph compiler
//!
//! Translates a frozen development-environment specification into an
//! ordered plan of filesystem build operations plus a label map:
//! - `spec`: the frozen record of declared build options
//! - `snapshot`: immutable filesystem snapshots, deltas, diff and merge
//! - `stages`: builders deriving new snapshots from spec fields
//! - `compile`: the orchestrator sequencing stages into a final snapshot,
//!   and the marshaler producing a portable plan definition
//! - `labels`: the label map describing the plan's declared contents

pub mod compile;
pub mod consts;
pub mod labels;
pub mod progress;
pub mod snapshot;
pub mod spec;
pub mod stages;
pub mod util;
