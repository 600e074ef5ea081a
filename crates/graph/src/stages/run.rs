//! User run commands.

use crate::snapshot::Snapshot;

/// Apply user-declared commands in declared order.
///
/// Runs strictly after all package and environment stages, since commands
/// may depend on the tools those stages installed.
pub fn commands(snapshot: &Snapshot, commands: &[String]) -> Snapshot {
  let mut out = snapshot.clone();
  for command in commands {
    out = out.exec(command.clone());
  }
  out
}
