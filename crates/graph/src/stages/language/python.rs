//! PyPI index configuration and package installs.

use crate::consts::CONDA_ROOT;
use crate::snapshot::{CacheMount, Snapshot};

/// Write the pip index configuration.
///
/// Derives from the channel-configuration stage: the index configuration
/// depends on the environment that stage sets up, which is the one ordering
/// constraint in the Python branch that cannot be parallelized.
pub fn pypi_index(snapshot: &Snapshot, index: Option<&str>) -> Snapshot {
  let Some(index) = index else {
    return snapshot.clone();
  };
  let pip_conf = format!("[global]\nindex-url = {index}\n");
  snapshot.mkfile("/root/.config/pip/pip.conf", pip_conf, 0o644)
}

/// Install PyPI packages as an independent delta.
pub fn install(snapshot: &Snapshot, packages: &[String], cache_prefix: &str) -> Snapshot {
  if packages.is_empty() {
    return snapshot.clone();
  }
  let command = format!("{CONDA_ROOT}/bin/python -m pip install {}", packages.join(" "));
  snapshot.exec_cached(
    command,
    vec![CacheMount {
      id: format!("{cache_prefix}-pip"),
      target: "/root/.cache/pip".to_string(),
    }],
  )
}

#[cfg(test)]
mod tests {
  use crate::snapshot::LayerOp;

  use super::*;

  #[test]
  fn no_index_is_a_no_op() {
    let base = Snapshot::source("img");
    assert_eq!(pypi_index(&base, None).id(), base.id());
  }

  #[test]
  fn index_writes_pip_conf() {
    let base = Snapshot::source("img");
    let out = pypi_index(&base, Some("https://mirror.example.com/simple"));

    match out.layers().last().unwrap() {
      LayerOp::Mkfile { path, contents, .. } => {
        assert_eq!(path, "/root/.config/pip/pip.conf");
        assert!(contents.contains("index-url = https://mirror.example.com/simple"));
      }
      other => panic!("expected a mkfile layer, got {other:?}"),
    }
  }

  #[test]
  fn install_preserves_package_order() {
    let base = Snapshot::source("img");
    let out = install(&base, &["numpy".to_string(), "pandas".to_string()], "test");

    match out.layers().last().unwrap() {
      LayerOp::Exec { command, .. } => {
        assert!(command.ends_with("pip install numpy pandas"));
      }
      other => panic!("expected an exec layer, got {other:?}"),
    }
  }
}
