//! Language-branch stages.
//!
//! The two branches are mutually exclusive per compilation: the R branch
//! only installs packages, while the Python branch configures the conda
//! channel and PyPI index (an order-dependent chain) before forking its
//! independent install deltas.

pub mod conda;
pub mod python;
pub mod r;
