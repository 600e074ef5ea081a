//! Specification state types.

use serde::{Deserialize, Serialize};

/// The language runtime branch of a specification.
///
/// Exactly one branch is active per compilation; the orchestrator dispatches
/// on it once. The two branches share no stage sequence beyond system
/// package installation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  /// The generic/data-science branch: conda environment, PyPI installs,
  /// shell and interpreter configuration.
  #[default]
  Python,
  /// The R branch: package installation only.
  R,
}

impl Language {
  pub fn as_str(&self) -> &'static str {
    match self {
      Language::Python => "python",
      Language::R => "r",
    }
  }
}

impl std::fmt::Display for Language {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Version-control identity injected by the version-control stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitIdentity {
  pub name: String,
  pub email: String,
  pub editor: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn language_default_is_python() {
    assert_eq!(Language::default(), Language::Python);
  }

  #[test]
  fn language_display() {
    assert_eq!(Language::Python.to_string(), "python");
    assert_eq!(Language::R.to_string(), "r");
  }
}
