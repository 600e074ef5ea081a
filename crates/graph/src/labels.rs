//! Label map generation from a frozen specification.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::consts;
use crate::spec::BuildSpec;

/// Errors from label serialization.
#[derive(Debug, Error)]
pub enum LabelError {
  #[error("failed to serialize the {list} package list: {source}")]
  Serialize {
    list: &'static str,
    #[source]
    source: serde_json::Error,
  },
}

/// Build the label map describing a specification's declared contents.
///
/// Pure over the frozen spec and independent of snapshot computation, so it
/// is safe to call at any point after validation. GPU labels appear only
/// when a CUDA version is declared, the CUDNN label only when both versions
/// are; the vendor label is always present.
pub fn build(spec: &BuildSpec) -> Result<BTreeMap<String, String>, LabelError> {
  let mut labels = BTreeMap::new();

  labels.insert(
    consts::LABEL_SYSTEM_PACKAGES.to_string(),
    serialize_list("system", &spec.system_packages)?,
  );
  labels.insert(
    consts::LABEL_PYPI_PACKAGES.to_string(),
    serialize_list("pypi", &spec.pypi_packages)?,
  );
  labels.insert(
    consts::LABEL_R_PACKAGES.to_string(),
    serialize_list("r", &spec.r_packages)?,
  );

  if let Some(cuda) = &spec.cuda {
    labels.insert(consts::LABEL_GPU.to_string(), "true".to_string());
    labels.insert(consts::LABEL_CUDA.to_string(), cuda.clone());
    if let Some(cudnn) = &spec.cudnn {
      labels.insert(consts::LABEL_CUDNN.to_string(), cudnn.clone());
    }
  }

  labels.insert(consts::LABEL_VENDOR.to_string(), consts::VENDOR.to_string());

  Ok(labels)
}

fn serialize_list(list: &'static str, packages: &[String]) -> Result<String, LabelError> {
  serde_json::to_string(packages).map_err(|source| LabelError::Serialize { list, source })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn vendor_label_is_always_present() {
    let labels = build(&BuildSpec::default()).unwrap();
    assert_eq!(labels.get(consts::LABEL_VENDOR).map(String::as_str), Some(consts::VENDOR));
  }

  #[test]
  fn package_lists_serialize_as_json() {
    let spec = BuildSpec {
      system_packages: vec!["curl".to_string(), "git".to_string()],
      ..Default::default()
    };
    let labels = build(&spec).unwrap();
    assert_eq!(
      labels.get(consts::LABEL_SYSTEM_PACKAGES).map(String::as_str),
      Some(r#"["curl","git"]"#)
    );
    assert_eq!(labels.get(consts::LABEL_PYPI_PACKAGES).map(String::as_str), Some("[]"));
  }

  #[test]
  fn gpu_labels_absent_without_cuda() {
    let spec = BuildSpec {
      cudnn: Some("8".to_string()),
      ..Default::default()
    };
    let labels = build(&spec).unwrap();
    assert!(!labels.contains_key(consts::LABEL_GPU));
    assert!(!labels.contains_key(consts::LABEL_CUDA));
    // CUDNN is only meaningful alongside CUDA.
    assert!(!labels.contains_key(consts::LABEL_CUDNN));
  }

  #[test]
  fn cuda_without_cudnn_omits_the_cudnn_label() {
    let spec = BuildSpec {
      cuda: Some("11.7".to_string()),
      ..Default::default()
    };
    let labels = build(&spec).unwrap();
    assert_eq!(labels.get(consts::LABEL_GPU).map(String::as_str), Some("true"));
    assert_eq!(labels.get(consts::LABEL_CUDA).map(String::as_str), Some("11.7"));
    assert!(!labels.contains_key(consts::LABEL_CUDNN));
  }

  #[test]
  fn cuda_with_cudnn_emits_both() {
    let spec = BuildSpec {
      cuda: Some("11.7".to_string()),
      cudnn: Some("8".to_string()),
      ..Default::default()
    };
    let labels = build(&spec).unwrap();
    assert_eq!(labels.get(consts::LABEL_CUDA).map(String::as_str), Some("11.7"));
    assert_eq!(labels.get(consts::LABEL_CUDNN).map(String::as_str), Some("8"));
  }
}
