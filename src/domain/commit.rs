use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Markers recognised at the start of a message line as a breaking change.
pub const DEFAULT_BREAKING_MARKERS: &[&str] = &["BREAKING CHANGE:", "BREAKING-CHANGE:"];

const HEADER_PATTERN: &str =
    r"^(?P<type>[A-Za-z]+)(?:\((?P<scope>[^()\r\n]*)\))?(?P<bang>!)?:[ \t]*(?P<subject>.*)$";

fn header_regex() -> Option<&'static Regex> {
    static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(HEADER_PATTERN).ok()).as_ref()
}

/// Conventional commit type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    Revert,
    /// Anything that isn't an exact, case-sensitive match of a known type
    Unrecognized,
}

impl CommitType {
    /// Classify a header token. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Self {
        match token {
            "feat" => CommitType::Feat,
            "fix" => CommitType::Fix,
            "docs" => CommitType::Docs,
            "style" => CommitType::Style,
            "refactor" => CommitType::Refactor,
            "perf" => CommitType::Perf,
            "test" => CommitType::Test,
            "chore" => CommitType::Chore,
            "revert" => CommitType::Revert,
            _ => CommitType::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Revert => "revert",
            CommitType::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        *self != CommitType::Unrecognized
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed representation of a commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    #[serde(rename = "type")]
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub subject: String,
    pub breaking: bool,
    /// Text following the breaking-change marker, when one was present
    pub breaking_note: Option<String>,
    #[serde(skip)]
    pub raw: String,
}

impl Commit {
    /// Parse with the default breaking-change markers
    pub fn parse(message: &str) -> Self {
        CommitParser::default().parse(message)
    }
}

/// Turns raw commit messages into [`Commit`] records.
///
/// Parsing never fails: commit history is uncontrolled input, so anything that
/// doesn't look like `type(scope): subject` with a known type and a non-empty
/// subject degrades to [`CommitType::Unrecognized`] with the whole message
/// kept as the subject.
///
/// A line starting with one of the breaking-change markers marks the commit
/// breaking whatever its type, as does the `type!:` header form.
#[derive(Debug, Clone)]
pub struct CommitParser {
    breaking_markers: Vec<String>,
}

impl Default for CommitParser {
    fn default() -> Self {
        CommitParser {
            breaking_markers: DEFAULT_BREAKING_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl CommitParser {
    /// Create a parser with custom breaking-change markers.
    ///
    /// Empty markers are ignored, otherwise every line would count as breaking.
    pub fn new(breaking_markers: Vec<String>) -> Self {
        CommitParser {
            breaking_markers: breaking_markers
                .into_iter()
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn parse(&self, message: &str) -> Commit {
        let text = message.trim();
        let header = text.lines().next().unwrap_or("");
        let marker_note = self.find_breaking_marker(text);
        let has_marker = marker_note.is_some();
        let breaking_note = marker_note.filter(|note| !note.is_empty());

        if let Some(captures) = header_regex().and_then(|re| re.captures(header)) {
            let commit_type = CommitType::from_token(&captures["type"]);
            let subject = captures["subject"].trim();

            if commit_type.is_recognized() && !subject.is_empty() {
                let scope = captures
                    .name("scope")
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty());
                let has_bang = captures.name("bang").is_some();

                return Commit {
                    commit_type,
                    scope,
                    subject: subject.to_string(),
                    breaking: has_bang || has_marker,
                    breaking_note,
                    raw: message.to_string(),
                };
            }
        }

        Commit {
            commit_type: CommitType::Unrecognized,
            scope: None,
            subject: text.to_string(),
            breaking: has_marker,
            breaking_note,
            raw: message.to_string(),
        }
    }

    fn find_breaking_marker(&self, text: &str) -> Option<String> {
        text.lines().find_map(|line| {
            self.breaking_markers
                .iter()
                .find_map(|marker| line.strip_prefix(marker.as_str()))
                .map(|rest| rest.trim().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_scope() {
        let commit = Commit::parse("feat(auth): add login");
        assert_eq!(commit.commit_type, CommitType::Feat);
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert_eq!(commit.subject, "add login");
        assert!(!commit.breaking);
    }

    #[test]
    fn test_parse_without_scope() {
        let commit = Commit::parse("fix: patch leak");
        assert_eq!(commit.commit_type, CommitType::Fix);
        assert_eq!(commit.scope, None);
        assert_eq!(commit.subject, "patch leak");
    }

    #[test]
    fn test_parse_keeps_raw_message() {
        let message = "docs: tidy readme\n\nMore words here.\n";
        let commit = Commit::parse(message);
        assert_eq!(commit.raw, message);
        assert_eq!(commit.subject, "tidy readme");
    }

    #[test]
    fn test_parse_every_known_type() {
        for token in [
            "feat", "fix", "docs", "style", "refactor", "perf", "test", "chore", "revert",
        ] {
            let commit = Commit::parse(&format!("{}: something", token));
            assert_eq!(commit.commit_type.as_str(), token);
            assert!(commit.commit_type.is_recognized());
        }
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        let commit = Commit::parse("Feat: add login");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
        assert_eq!(commit.subject, "Feat: add login");
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let commit = Commit::parse("build(ci): switch runner");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
        assert_eq!(commit.scope, None);
        assert_eq!(commit.subject, "build(ci): switch runner");
    }

    #[test]
    fn test_free_text_is_unrecognized() {
        let commit = Commit::parse("Random commit message\n\nwith a body");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
        assert_eq!(commit.subject, "Random commit message\n\nwith a body");
        assert!(!commit.breaking);
    }

    #[test]
    fn test_empty_message() {
        let commit = Commit::parse("");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
        assert_eq!(commit.subject, "");
    }

    #[test]
    fn test_empty_scope_is_dropped() {
        let commit = Commit::parse("fix(): tidy");
        assert_eq!(commit.commit_type, CommitType::Fix);
        assert_eq!(commit.scope, None);
    }

    #[test]
    fn test_breaking_change_footer() {
        let commit = Commit::parse("fix: something\n\nBREAKING CHANGE: field renamed");
        assert!(commit.breaking);
        assert_eq!(commit.breaking_note.as_deref(), Some("field renamed"));
    }

    #[test]
    fn test_breaking_marker_is_case_sensitive() {
        let commit = Commit::parse("fix: something\n\nbreaking change: not really");
        assert!(!commit.breaking);
    }

    #[test]
    fn test_breaking_marker_must_start_line() {
        let commit = Commit::parse("fix: something\n\nsee BREAKING CHANGE: in docs");
        assert!(!commit.breaking);
    }

    #[test]
    fn test_breaking_marker_on_non_bump_type() {
        let commit = Commit::parse("docs: rewrite\n\nBREAKING CHANGE: guide moved");
        assert_eq!(commit.commit_type, CommitType::Docs);
        assert!(commit.breaking);
    }

    #[test]
    fn test_marker_as_first_line() {
        let commit = Commit::parse("BREAKING CHANGE: drop v1 API");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
        assert!(commit.breaking);
        assert_eq!(commit.breaking_note.as_deref(), Some("drop v1 API"));
    }

    #[test]
    fn test_bang_header_is_breaking() {
        let commit = Commit::parse("feat(api)!: new response format");
        assert_eq!(commit.commit_type, CommitType::Feat);
        assert_eq!(commit.scope.as_deref(), Some("api"));
        assert!(commit.breaking);
        assert_eq!(commit.breaking_note, None);
    }

    #[test]
    fn test_hyphenated_marker_by_default() {
        let commit = Commit::parse("feat: x\n\nBREAKING-CHANGE: y");
        assert!(commit.breaking);
    }

    #[test]
    fn test_empty_subject_is_unrecognized() {
        let commit = Commit::parse("feat:");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
        assert_eq!(commit.subject, "feat:");
        assert!(!commit.breaking);

        let commit = Commit::parse("fix(db):   \n\nbody text");
        assert_eq!(commit.commit_type, CommitType::Unrecognized);
    }

    #[test]
    fn test_custom_markers() {
        let parser = CommitParser::new(vec!["INCOMPATIBLE:".to_string(), String::new()]);
        assert!(parser.parse("fix: x\n\nINCOMPATIBLE: y").breaking);
        assert!(!parser.parse("fix: x\n\nBREAKING CHANGE: y").breaking);
        assert!(!parser.parse("fix: x\n\nplain body").breaking);
    }
}
