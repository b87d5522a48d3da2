use crate::error::{ReleaseError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Semantic version representation
///
/// Field order gives the lexicographic (major, minor, patch) ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare `MAJOR.MINOR.PATCH` string.
    ///
    /// Pre-release and build suffixes are rejected: only plain release
    /// versions take part in bump decisions.
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = semver::Version::parse(text).map_err(|e| {
            ReleaseError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z ({})",
                text, e
            ))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(ReleaseError::version(format!(
                "Version '{}' carries pre-release or build metadata",
                text
            )));
        }

        Ok(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump version according to bump type.
    ///
    /// `VersionBump::None` yields [`ReleaseError::NothingToBump`]; check
    /// [`VersionBump::is_release`] before calling.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || ReleaseError::version(format!("Version {} cannot be bumped further", self));

        match bump_type {
            VersionBump::Major => Ok(Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            }),
            VersionBump::Minor => Ok(Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            }),
            VersionBump::Patch => Ok(Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            }),
            VersionBump::None => Err(ReleaseError::NothingToBump),
        }
    }

    /// Next version after `previous`, treating a first release as coming from 0.0.0.
    ///
    /// So a first feature release is 0.1.0 and a first breaking release is 1.0.0.
    pub fn next(previous: Option<Version>, bump_type: VersionBump) -> Result<Self> {
        previous.unwrap_or_default().bump(bump_type)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Version bump severity.
///
/// Variants are declared in ascending severity so the derived `Ord` is the
/// lattice `None < Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    pub fn is_release(&self) -> bool {
        *self != VersionBump::None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
