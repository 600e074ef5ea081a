//! Progress reporting for compilations.
//!
//! The compiler notifies a single write-only sink at stage boundaries.
//! Exactly one `finish` is delivered per successful compilation; a failed
//! compilation delivers none.

use std::sync::Mutex;

use tracing::info;

/// Write-only sink for compilation progress.
///
/// Implementations must serialize their own writes: stages that are
/// logically independent may be reported from concurrent contexts.
pub trait Reporter: Send + Sync {
  /// A stage has started building.
  fn stage_started(&self, stage: &str);

  /// A stage has produced its snapshot.
  fn stage_finished(&self, stage: &str);

  /// The whole compilation succeeded.
  fn finish(&self);
}

/// Default reporter: structured `tracing` events.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
  fn stage_started(&self, stage: &str) {
    info!(stage = %stage, "stage started");
  }

  fn stage_finished(&self, stage: &str) {
    info!(stage = %stage, "stage finished");
  }

  fn finish(&self) {
    info!("compilation finished");
  }
}

/// One recorded progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
  Started(String),
  Finished(String),
  Finish,
}

/// Reporter that records events in memory, for tests and callers that want
/// to inspect progress after the fact. Writes are serialized by a mutex.
#[derive(Debug, Default)]
pub struct RecordingReporter {
  events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingReporter {
  pub fn new() -> Self {
    Self::default()
  }

  /// All events recorded so far.
  pub fn events(&self) -> Vec<ProgressEvent> {
    self.lock().clone()
  }

  /// Number of `finish` signals delivered.
  pub fn finish_count(&self) -> usize {
    self
      .lock()
      .iter()
      .filter(|event| matches!(event, ProgressEvent::Finish))
      .count()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProgressEvent>> {
    self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }
}

impl Reporter for RecordingReporter {
  fn stage_started(&self, stage: &str) {
    self.lock().push(ProgressEvent::Started(stage.to_string()));
  }

  fn stage_finished(&self, stage: &str) {
    self.lock().push(ProgressEvent::Finished(stage.to_string()));
  }

  fn finish(&self) {
    self.lock().push(ProgressEvent::Finish);
  }
}
