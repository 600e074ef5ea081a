//! Target platform (os/arch pair) a build plan is marshaled for

use serde::{Deserialize, Serialize};

/// The platform a marshaled build plan targets
///
/// Build plans are always marshaled against one fixed platform; the
/// executing engine does not perform multi-architecture selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// The default target: `linux/amd64`
    pub fn linux_amd64() -> Self {
        Self {
            os: "linux".to_string(),
            arch: "amd64".to_string(),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
