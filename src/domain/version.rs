use crate::error::{NextverError, Result};
use std::fmt;

/// Default version for a repository that has never been released.
pub const DEFAULT_FIRST_VERSION: SemanticVersion = SemanticVersion {
    major: 0,
    minor: 1,
    patch: 0,
};

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict X.Y.Z version string, with an optional 'v'/'V' prefix
    pub fn parse(text: &str) -> Result<Self> {
        let clean = text.trim_start_matches('v').trim_start_matches('V');

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(NextverError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                text
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| NextverError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| NextverError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| NextverError::version(format!("Invalid patch version: {}", parts[2])))?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
        })
    }

    /// Apply a version impact. Major zeroes minor and patch, minor zeroes
    /// patch, none leaves the version untouched.
    pub fn bump(&self, impact: VersionImpact) -> Self {
        match impact {
            VersionImpact::Major => SemanticVersion {
                major: self.major + 1,
                minor: 0,
                patch: 0,
            },
            VersionImpact::Minor => SemanticVersion {
                major: self.major,
                minor: self.minor + 1,
                patch: 0,
            },
            VersionImpact::Patch => SemanticVersion {
                major: self.major,
                minor: self.minor,
                patch: self.patch + 1,
            },
            VersionImpact::None => *self,
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// The effect a commit (or a set of commits) has on the version.
///
/// Ordered as a lattice: impacts are only ever combined by taking the
/// maximum, never added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionImpact {
    None,
    Patch,
    Minor,
    Major,
}
