//! Specification state: the frozen record of all declared build options.
//!
//! A [`BuildSpec`] is constructed with defaults, populated by the external
//! specification loader, validated once, and read-only from then on. Each
//! compilation owns an independent instance; there is deliberately no
//! process-wide default instance, so concurrent compilations never share
//! state.

mod types;

pub use types::{GitIdentity, Language};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stratum_platform::{Os, Shell};

/// Errors produced by specification validation.
///
/// All of these reject the compilation before any stage executes.
#[derive(Debug, Error)]
pub enum SpecError {
  /// No GPU-enabled base image exists for this language/OS combination.
  #[error("unsupported configuration: CUDA {cuda} is not available for the {language} branch on {os}")]
  UnsupportedCuda { cuda: String, language: Language, os: Os },

  /// A package list belongs to a branch that is not active.
  #[error("{list} packages declared but the {language} branch is active")]
  InactiveBranchPackages { list: &'static str, language: Language },
}

/// All declared build options for one compilation.
///
/// Package lists preserve declaration order and are not deduplicated here,
/// so the deltas they produce stay reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildSpec {
  pub os: Os,
  pub language: Language,
  pub shell: Shell,

  /// CUDA toolkit version; presence selects a GPU-enabled base image.
  pub cuda: Option<String>,
  /// CUDNN version; meaningful only when `cuda` is set.
  pub cudnn: Option<String>,

  pub system_packages: Vec<String>,
  pub conda_packages: Vec<String>,
  pub pypi_packages: Vec<String>,
  pub r_packages: Vec<String>,

  /// Custom conda channel written by the channel configuration stage.
  pub conda_channel: Option<String>,
  /// Custom PyPI index mirror written by the index configuration stage.
  pub pypi_index: Option<String>,

  /// Path to public key material provisioned into the image.
  pub ssh_pubkey: Option<PathBuf>,
  /// Editor extension identifiers, `publisher.name`.
  pub editor_extensions: Vec<String>,
  /// Commands run after environment setup, in declared order.
  pub exec_commands: Vec<String>,
  /// Version-control identity, if any.
  pub git: Option<GitIdentity>,
}

impl BuildSpec {
  /// Whether this specification selects a GPU-enabled base image.
  pub fn gpu_enabled(&self) -> bool {
    self.cuda.is_some()
  }

  /// Reject unsupported or contradictory configurations.
  ///
  /// Runs once, before any stage executes; a specification that passes is
  /// frozen from the compiler's point of view.
  pub fn validate(&self) -> Result<(), SpecError> {
    match self.language {
      Language::R => {
        if let Some(cuda) = &self.cuda {
          return Err(SpecError::UnsupportedCuda {
            cuda: cuda.clone(),
            language: self.language,
            os: self.os,
          });
        }
        if !self.conda_packages.is_empty() {
          return Err(SpecError::InactiveBranchPackages {
            list: "conda",
            language: self.language,
          });
        }
        if !self.pypi_packages.is_empty() {
          return Err(SpecError::InactiveBranchPackages {
            list: "pypi",
            language: self.language,
          });
        }
      }
      Language::Python => {
        if !self.r_packages.is_empty() {
          return Err(SpecError::InactiveBranchPackages {
            list: "r",
            language: self.language,
          });
        }
      }
    }
    Ok(())
  }
}
