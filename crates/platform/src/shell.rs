//! Login shells an environment can be configured with

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Supported shell types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shell {
    #[default]
    Bash,
    Zsh,
}

impl Shell {
    /// Get the shell name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
        }
    }

    /// Absolute path of the shell binary inside the image
    pub fn binary(&self) -> &'static str {
        match self {
            Shell::Bash => "/bin/bash",
            Shell::Zsh => "/usr/bin/zsh",
        }
    }

    /// Name of the rc file this shell reads on startup
    pub fn rc_file(&self) -> &'static str {
        match self {
            Shell::Bash => ".bashrc",
            Shell::Zsh => ".zshrc",
        }
    }

    /// Whether the shell ships with the base image or must be installed
    pub fn preinstalled(&self) -> bool {
        matches!(self, Shell::Bash)
    }
}

impl FromStr for Shell {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Shell::Bash),
            "zsh" => Ok(Shell::Zsh),
            other => Err(PlatformError::UnknownShell(other.to_string())),
        }
    }
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_as_str() {
        assert_eq!(Shell::Bash.as_str(), "bash");
        assert_eq!(Shell::Zsh.as_str(), "zsh");
    }

    #[test]
    fn test_shell_default() {
        assert_eq!(Shell::default(), Shell::Bash);
    }

    #[test]
    fn test_shell_rc_file() {
        assert_eq!(Shell::Bash.rc_file(), ".bashrc");
        assert_eq!(Shell::Zsh.rc_file(), ".zshrc");
    }

    #[test]
    fn test_shell_parse() {
        assert_eq!("zsh".parse::<Shell>().unwrap(), Shell::Zsh);
        assert!("fish".parse::<Shell>().is_err());
    }

    #[test]
    fn test_only_bash_is_preinstalled() {
        assert!(Shell::Bash.preinstalled());
        assert!(!Shell::Zsh.preinstalled());
    }
}
