//! Operating system variants a build can target

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Supported base operating systems
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Os {
    #[default]
    Ubuntu2004,
}

impl Os {
    /// Get the OS name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Ubuntu2004 => "ubuntu20.04",
        }
    }

    /// The plain base image for this OS
    pub fn image(&self) -> &'static str {
        match self {
            Os::Ubuntu2004 => "docker.io/library/ubuntu:20.04",
        }
    }

    /// The OS suffix used by CUDA base image tags
    ///
    /// CUDA images are tagged like `nvidia/cuda:<cuda>-cudnn<cudnn>-devel-<suffix>`.
    pub fn cuda_image_suffix(&self) -> &'static str {
        match self {
            Os::Ubuntu2004 => "ubuntu20.04",
        }
    }
}

impl FromStr for Os {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ubuntu20.04" | "ubuntu-20.04" => Ok(Os::Ubuntu2004),
            other => Err(PlatformError::UnknownOs(other.to_string())),
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_as_str() {
        assert_eq!(Os::Ubuntu2004.as_str(), "ubuntu20.04");
    }

    #[test]
    fn test_os_parse() {
        assert_eq!("ubuntu20.04".parse::<Os>().unwrap(), Os::Ubuntu2004);
        assert_eq!("ubuntu-20.04".parse::<Os>().unwrap(), Os::Ubuntu2004);
        assert!("alpine3.18".parse::<Os>().is_err());
    }

    #[test]
    fn test_os_default() {
        assert_eq!(Os::default(), Os::Ubuntu2004);
    }

    #[test]
    fn test_os_image() {
        assert!(Os::Ubuntu2004.image().ends_with("ubuntu:20.04"));
    }
}
