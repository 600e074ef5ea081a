//! System package installation.

use crate::snapshot::{CacheMount, Snapshot};

/// Apt cache mounts shared by stages that install distro packages.
pub(crate) fn apt_caches(cache_prefix: &str) -> Vec<CacheMount> {
  vec![
    CacheMount {
      id: format!("{cache_prefix}-apt-cache"),
      target: "/var/cache/apt".to_string(),
    },
    CacheMount {
      id: format!("{cache_prefix}-apt-lib"),
      target: "/var/lib/apt".to_string(),
    },
  ]
}

/// Install OS-level packages on top of `base`.
///
/// An empty list returns the input snapshot unchanged, which diffs to an
/// empty delta downstream.
pub fn install(base: &Snapshot, packages: &[String], cache_prefix: &str) -> Snapshot {
  if packages.is_empty() {
    return base.clone();
  }
  let command = format!(
    "apt-get update && apt-get install --no-install-recommends --yes {}",
    packages.join(" ")
  );
  base.exec_cached(command, apt_caches(cache_prefix))
}
