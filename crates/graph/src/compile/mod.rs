//! Compile orchestration.
//!
//! The orchestrator sequences stage builders in a fixed order with no
//! backward transitions:
//!
//! 1. Base — base filesystem for the selected OS/GPU requirements
//! 2. System — OS package install, diffed as an independent delta
//! 3. Language branch — R (two deltas merged) or Python (channel/index
//!    chain, then ssh / shell-fed conda / pypi forks, plus an optional
//!    editor-extension delta, folded into one merge)
//! 4. Run — user commands on top of the merged snapshot
//! 5. VersionControl — identity injection
//! 6. Finalize — progress flush, snapshot and labels returned
//!
//! Any stage failure aborts the whole compilation with the failing stage's
//! name attached; no partial results are returned and nothing is retried.

mod marshal;

pub use marshal::{Definition, MarshalError, PlanOp, PlanOpKind};

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use stratum_platform::Platform;

use crate::consts;
use crate::labels::{self, LabelError};
use crate::progress::{Reporter, TracingReporter};
use crate::snapshot::{GraphError, Snapshot, diff, merge};
use crate::spec::{BuildSpec, Language, SpecError};
use crate::stages::{self, StageError};

/// Options controlling compilation that are not part of the specification.
#[derive(Debug, Clone)]
pub struct CompileOptions {
  /// Prefix for persistent cache mount ids, so concurrent projects do not
  /// share caches by accident.
  pub cache_prefix: String,
}

impl Default for CompileOptions {
  fn default() -> Self {
    Self {
      cache_prefix: consts::DEFAULT_CACHE_PREFIX.to_string(),
    }
  }
}

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
pub enum CompileError {
  /// The specification is unsupported or contradictory; rejected before
  /// any stage executes.
  #[error("invalid specification: {0}")]
  Spec(#[from] SpecError),

  /// A stage builder failed.
  #[error("stage {stage:?} failed: {source}")]
  Stage {
    stage: &'static str,
    #[source]
    source: StageError,
  },

  /// A diff or merge precondition was violated.
  #[error(transparent)]
  Graph(#[from] GraphError),

  /// Label serialization failed.
  #[error(transparent)]
  Labels(#[from] LabelError),
}

impl CompileError {
  /// The name of the failing stage, when the failure came from one.
  pub fn stage(&self) -> Option<&'static str> {
    match self {
      CompileError::Stage { stage, .. } => Some(stage),
      _ => None,
    }
  }
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct Compilation {
  /// The final filesystem snapshot.
  pub snapshot: Snapshot,
  /// Labels describing the plan's declared contents.
  pub labels: BTreeMap<String, String>,
}

impl Compilation {
  /// Marshal the final snapshot into a portable plan definition for the
  /// executing engine.
  pub fn marshal(&self, platform: Platform) -> Result<Definition, MarshalError> {
    marshal::marshal(&self.snapshot, platform)
  }
}

/// The build-graph compiler.
///
/// Owns one frozen specification and a progress sink. Each call to
/// [`compile`](Self::compile) produces an independent snapshot graph;
/// concurrent compilations each construct their own `Compiler`.
pub struct Compiler {
  spec: BuildSpec,
  options: CompileOptions,
  reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for Compiler {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Compiler")
      .field("spec", &self.spec)
      .field("options", &self.options)
      .finish_non_exhaustive()
  }
}

impl Compiler {
  /// Validate the specification and construct a compiler for it.
  ///
  /// Unsupported configurations are rejected here, before any stage runs.
  pub fn new(spec: BuildSpec, options: CompileOptions) -> Result<Self, CompileError> {
    spec.validate()?;
    Ok(Self {
      spec,
      options,
      reporter: Arc::new(TracingReporter),
    })
  }

  /// Replace the progress sink.
  pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
    self.reporter = reporter;
    self
  }

  /// Read access to the frozen specification.
  pub fn spec(&self) -> &BuildSpec {
    &self.spec
  }

  /// Run the full compilation.
  pub fn compile(&self) -> Result<Compilation, CompileError> {
    let spec = &self.spec;
    let cache = self.options.cache_prefix.as_str();
    info!(
      language = %spec.language,
      os = %spec.os,
      gpu = spec.gpu_enabled(),
      "compiling build graph"
    );

    let base = self.stage(consts::STAGE_BASE, || stages::base::build(spec));

    let system = self.stage(consts::STAGE_SYSTEM, || {
      stages::system::install(&base, &spec.system_packages, cache)
    });
    let system_delta = diff(&base, &system, consts::STAGE_SYSTEM)?;

    let merged = match spec.language {
      Language::R => {
        let r = self.stage(consts::STAGE_R, || {
          stages::language::r::install(&base, &spec.r_packages)
        });
        let r_delta = diff(&base, &r, consts::STAGE_R)?;
        merge(&base, vec![system_delta, r_delta], consts::STAGE_MERGE)?
      }
      Language::Python => {
        // The index configuration depends on the channel environment; this
        // chain cannot be parallelized.
        let channel = self.stage(consts::STAGE_CHANNEL, || {
          stages::language::conda::channel(&base, spec.conda_channel.as_deref())
        });
        let mirror = self.stage(consts::STAGE_PYPI_INDEX, || {
          stages::language::python::pypi_index(&channel, spec.pypi_index.as_deref())
        });

        let ssh = self.try_stage(consts::STAGE_SSH, || {
          stages::ssh::provision(&mirror, spec.ssh_pubkey.as_deref())
        })?;
        let ssh_delta = diff(&mirror, &ssh, consts::STAGE_SSH)?;

        // Conda affects both the shell and the interpreter, so its installs
        // derive from the shell stage; the delta is still taken against the
        // pre-shell snapshot and carries the shell configuration with it.
        let shell = self.stage(consts::STAGE_SHELL, || {
          stages::shellcfg::configure(&mirror, spec.shell, cache)
        });
        let conda = self.stage(consts::STAGE_CONDA, || {
          stages::language::conda::install(&shell, &spec.conda_packages, cache)
        });
        let conda_delta = diff(&mirror, &conda, consts::STAGE_CONDA)?;

        let pypi = self.stage(consts::STAGE_PYPI, || {
          stages::language::python::install(&mirror, &spec.pypi_packages, cache)
        });
        let pypi_delta = diff(&mirror, &pypi, consts::STAGE_PYPI)?;

        let mut layers = vec![system_delta, ssh_delta, conda_delta, pypi_delta];
        let editor = self.try_stage(consts::STAGE_EDITOR, || {
          stages::editor::install(&base, &spec.editor_extensions)
        })?;
        if let Some(editor) = editor {
          layers.push(diff(&base, &editor, consts::STAGE_EDITOR)?);
        }
        merge(&mirror, layers, consts::STAGE_MERGE)?
      }
    };
    debug!(layers = merged.layers().len(), "environment layers merged");

    let run = self.stage(consts::STAGE_RUN, || {
      stages::run::commands(&merged, &spec.exec_commands)
    });
    let snapshot = self.try_stage(consts::STAGE_GIT, || {
      stages::git::configure(&run, spec.git.as_ref())
    })?;

    let labels = labels::build(spec)?;

    self.reporter.finish();
    info!(labels = labels.len(), "compilation finished");
    Ok(Compilation { snapshot, labels })
  }

  fn stage<T>(&self, name: &'static str, build: impl FnOnce() -> T) -> T {
    self.reporter.stage_started(name);
    let out = build();
    self.reporter.stage_finished(name);
    out
  }

  fn try_stage<T>(
    &self,
    name: &'static str,
    build: impl FnOnce() -> Result<T, StageError>,
  ) -> Result<T, CompileError> {
    self.reporter.stage_started(name);
    let out = build().map_err(|source| CompileError::Stage { stage: name, source })?;
    self.reporter.stage_finished(name);
    Ok(out)
  }
}
