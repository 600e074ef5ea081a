//! R package installation.

use crate::consts::CRAN_MIRROR;
use crate::snapshot::Snapshot;

/// Install R packages from CRAN.
///
/// The R branch's only language stage; an empty list is a no-op.
pub fn install(snapshot: &Snapshot, packages: &[String]) -> Snapshot {
  if packages.is_empty() {
    return snapshot.clone();
  }
  let quoted: Vec<String> = packages.iter().map(|package| format!("\"{package}\"")).collect();
  let command = format!(
    "R -e 'install.packages(c({}), repos=\"{}\")'",
    quoted.join(", "),
    CRAN_MIRROR
  );
  snapshot.exec(command)
}
