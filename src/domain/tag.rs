use crate::domain::Version;
use crate::error::{ReleaseError, Result};

const VERSION_PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    prefix: String,
    suffix: String,
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            prefix: "v".to_string(),
            suffix: String::new(),
        }
    }
}

/// Result of scanning the tag list for release tags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagScan {
    /// Highest release version found and the tag carrying it
    pub latest: Option<(String, Version)>,
    /// Tags shaped like the pattern whose version part didn't parse
    pub unparsable: Vec<(String, String)>,
}

impl TagPattern {
    /// Build a pattern; it must contain exactly one `{version}` placeholder.
    pub fn parse(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(VERSION_PLACEHOLDER).collect();
        if parts.len() != 2 {
            return Err(ReleaseError::tag(format!(
                "Pattern '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }

        Ok(TagPattern {
            prefix: parts[0].to_string(),
            suffix: parts[1].to_string(),
        })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// Extract the version from a tag that follows this pattern.
    pub fn parse_version(&self, tag: &str) -> Result<Version> {
        let version_part = self.version_part(tag).ok_or_else(|| {
            ReleaseError::tag(format!("Tag '{}' does not match pattern '{}'", tag, self))
        })?;
        Version::parse(version_part)
    }

    /// Whether the tag is a release tag for this pattern
    pub fn matches(&self, tag: &str) -> bool {
        self.parse_version(tag).is_ok()
    }

    /// Find the highest release version among `tags`.
    ///
    /// Tags without the pattern's prefix and suffix are ignored silently. Tags
    /// that have them and start with a digit but still fail to parse (say
    /// `v1.2` or `v1.2.3-rc.1`) are reported in [`TagScan::unparsable`].
    pub fn scan<I, S>(&self, tags: I) -> TagScan
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = TagScan::default();

        for tag in tags {
            let tag = tag.as_ref();
            let Some(version_part) = self.version_part(tag) else {
                continue;
            };

            match Version::parse(version_part) {
                Ok(version) => {
                    let is_newer = scan
                        .latest
                        .as_ref()
                        .map_or(true, |(_, current)| version > *current);
                    if is_newer {
                        scan.latest = Some((tag.to_string(), version));
                    }
                }
                Err(e) if version_part.starts_with(|c: char| c.is_ascii_digit()) => {
                    scan.unparsable.push((tag.to_string(), e.to_string()));
                }
                Err(_) => {}
            }
        }

        scan
    }

    fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }
}

impl std::fmt::Display for TagPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.prefix, VERSION_PLACEHOLDER, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_suffix() {
        let pattern = TagPattern::parse("release-{version}-final").unwrap();
        assert_eq!(
            pattern.format(&Version::new(1, 2, 3)),
            "release-1.2.3-final"
        );
    }

    #[test]
    fn test_pattern_requires_single_placeholder() {
        assert!(TagPattern::parse("free-form").is_err());
        assert!(TagPattern::parse("{version}-{version}").is_err());
        assert!(TagPattern::parse("{version}").is_ok());
    }

    #[test]
    fn test_pattern_display_round_trips() {
        let pattern = TagPattern::parse("app-v{version}").unwrap();
        assert_eq!(pattern.to_string(), "app-v{version}");
    }

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::default();
        assert!(pattern.matches("v1.2.3"));
        assert!(!pattern.matches("release-1.2.3"));
        assert!(!pattern.matches("1.2.3"));
        assert!(!pattern.matches("V1.2.3"));
        assert!(!pattern.matches("v1.2"));
    }

    #[test]
    fn test_parse_version_from_tag() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.parse_version("v2.3.1").unwrap(), Version::new(2, 3, 1));
        assert!(pattern.parse_version("v2.3.1-beta.1").is_err());
    }

    #[test]
    fn test_scan_picks_highest_version_not_last_listed() {
        let pattern = TagPattern::default();
        let scan = pattern.scan(["v1.10.0", "v1.9.3", "v1.2.0"]);
        assert_eq!(
            scan.latest,
            Some(("v1.10.0".to_string(), Version::new(1, 10, 0)))
        );
        assert!(scan.unparsable.is_empty());
    }

    #[test]
    fn test_scan_reports_unparsable_tags() {
        let pattern = TagPattern::default();
        let scan = pattern.scan(["v1.0.0", "v2.0", "v3.0.0-rc.1", "vendor-drop", "nightly"]);
        assert_eq!(scan.latest.unwrap().1, Version::new(1, 0, 0));
        let names: Vec<&str> = scan.unparsable.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(names, vec!["v2.0", "v3.0.0-rc.1"]);
    }

    #[test]
    fn test_scan_without_release_tags() {
        let scan = TagPattern::default().scan(Vec::<String>::new());
        assert_eq!(scan.latest, None);
    }
}
