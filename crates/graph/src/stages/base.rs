//! Base image selection.

use crate::consts::DEFAULT_CUDNN;
use crate::snapshot::Snapshot;
use crate::spec::{BuildSpec, Language};

/// Produce the base filesystem snapshot for the selected OS and GPU
/// requirements.
///
/// A declared CUDA version selects the GPU-enabled image variant (with the
/// default CUDNN when none is declared); otherwise the language branch
/// picks its stock image.
pub fn build(spec: &BuildSpec) -> Snapshot {
  Snapshot::source(image_for(spec)).env("DEBIAN_FRONTEND", "noninteractive")
}

fn image_for(spec: &BuildSpec) -> String {
  if let Some(cuda) = &spec.cuda {
    let cudnn = spec.cudnn.as_deref().unwrap_or(DEFAULT_CUDNN);
    return format!(
      "docker.io/nvidia/cuda:{}-cudnn{}-devel-{}",
      cuda,
      cudnn,
      spec.os.cuda_image_suffix()
    );
  }
  match spec.language {
    Language::Python => "docker.io/library/python:3.11".to_string(),
    Language::R => "docker.io/library/r-base:4.2.0".to_string(),
  }
}
