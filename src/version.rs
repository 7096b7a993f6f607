use std::fmt;

use log::debug;
use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{BumpError, Result};

/// A semantic version parsed from a git tag.
///
/// Keeps the tag string it was parsed from so that a leading `v` survives
/// display and bumping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedVersion {
    pub version: Version,
    pub original: String,
}

/// Represents the type of semantic version bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    /// Order in which the bumps are offered to the user.
    pub const PROMPT_ORDER: [VersionBump; 3] =
        [VersionBump::Patch, VersionBump::Minor, VersionBump::Major];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TaggedVersion {
    /// Parses a tag name as a semantic version.
    ///
    /// A single leading `v` or `V` is accepted. Missing minor or patch
    /// components count as zero, so `v2` reads as `2.0.0` and `1.2-rc.1`
    /// as `1.2.0-rc.1`; the tag text itself is kept as written.
    ///
    /// # Example
    /// ```
    /// # use git_bump::version::TaggedVersion;
    /// let v = TaggedVersion::parse("v1.2.3").unwrap();
    /// assert_eq!(v.version, semver::Version::new(1, 2, 3));
    /// assert_eq!(v.to_string(), "v1.2.3");
    /// ```
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let raw = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let version = Version::parse(&complete_version(raw))
            .map_err(|e| BumpError::version(format!("'{}' is not a semantic version: {}", tag, e)))?;

        Ok(TaggedVersion {
            version,
            original: trimmed.to_string(),
        })
    }

    /// The prefix in front of the numeric part, if any (`"v"`, `"V"` or `""`).
    pub fn prefix(&self) -> &str {
        match self.original.chars().next() {
            Some('v') | Some('V') => &self.original[..1],
            _ => "",
        }
    }

    /// Bumps the version, keeping the original prefix.
    ///
    /// Pre-release and build metadata are always dropped. A patch bump on a
    /// pre-release only drops the pre-release, since `1.2.3-rc.1` already
    /// precedes `1.2.3`.
    pub fn bump(&self, bump: VersionBump) -> TaggedVersion {
        let mut next = self.version.clone();
        next.pre = Prerelease::EMPTY;
        next.build = BuildMetadata::EMPTY;

        match bump {
            VersionBump::Major => {
                next.major += 1;
                next.minor = 0;
                next.patch = 0;
            }
            VersionBump::Minor => {
                next.minor += 1;
                next.patch = 0;
            }
            VersionBump::Patch => {
                if self.version.pre.is_empty() {
                    next.patch += 1;
                }
            }
        }

        TaggedVersion {
            original: format!("{}{}", self.prefix(), next),
            version: next,
        }
    }

    /// All three bump candidates
    pub fn candidates(&self) -> NextVersions {
        NextVersions {
            major: self.bump(VersionBump::Major),
            minor: self.bump(VersionBump::Minor),
            patch: self.bump(VersionBump::Patch),
        }
    }
}

/// Pads `MAJOR` or `MAJOR.MINOR` with `.0` components, keeping any
/// `-pre`/`+build` suffix in place.
fn complete_version(raw: &str) -> String {
    let (core, suffix) = raw
        .find(|c: char| c == '-' || c == '+')
        .map_or((raw, ""), |i| raw.split_at(i));

    let components = core.split('.').count();
    if core.is_empty() || components >= 3 {
        return raw.to_string();
    }

    let mut completed = core.to_string();
    for _ in components..3 {
        completed.push_str(".0");
    }
    completed.push_str(suffix);
    completed
}

impl fmt::Display for TaggedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// The versions reachable from the current one with a single bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextVersions {
    pub major: TaggedVersion,
    pub minor: TaggedVersion,
    pub patch: TaggedVersion,
}

impl NextVersions {
    pub fn get(&self, bump: VersionBump) -> &TaggedVersion {
        match bump {
            VersionBump::Major => &self.major,
            VersionBump::Minor => &self.minor,
            VersionBump::Patch => &self.patch,
        }
    }

    /// Prompt labels in [`VersionBump::PROMPT_ORDER`], e.g. `"patch: v1.2.4"`.
    pub fn options(&self) -> Vec<String> {
        VersionBump::PROMPT_ORDER
            .iter()
            .map(|bump| format!("{}: {}", bump, self.get(*bump)))
            .collect()
    }

    /// Maps an index into [`NextVersions::options`] back to its candidate.
    pub fn by_index(&self, index: usize) -> Option<&TaggedVersion> {
        VersionBump::PROMPT_ORDER
            .get(index)
            .map(|bump| self.get(*bump))
    }
}

/// Parses every tag that is a semantic version, silently dropping the rest.
pub fn parse_versions<S: AsRef<str>>(tags: &[S]) -> Vec<TaggedVersion> {
    tags.iter()
        .filter_map(|tag| match TaggedVersion::parse(tag.as_ref()) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!("Skipping tag: {}", e);
                None
            }
        })
        .collect()
}

/// Sorts ascending by semver precedence; the highest version ends up last.
pub fn sort_versions(versions: &mut [TaggedVersion]) {
    versions.sort_by(|a, b| a.version.cmp(&b.version));
}
