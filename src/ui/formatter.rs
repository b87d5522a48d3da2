//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text, `display_*` print it. Styling goes
//! through `console`, which drops colours when the stream is not a terminal.

use crate::analyzer::ReleaseDecision;
use crate::boundary::BoundaryWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line per commit, truncated to 60 characters, at most 10 lines.
pub fn format_commit_analysis(commit_messages: &[String], latest_tag: Option<&str>) -> String {
    let mut out = match latest_tag {
        Some(tag) => format!(
            "{} commit(s) since {}:\n",
            commit_messages.len(),
            style(tag).bold()
        ),
        None => format!("{} commit(s) since the beginning of history:\n", commit_messages.len()),
    };

    for (i, message) in commit_messages.iter().take(10).enumerate() {
        let header = message.lines().next().unwrap_or("");
        let short: String = header.chars().take(60).collect();
        out.push_str(&format!("  {}. {}\n", i + 1, short));
    }

    if commit_messages.len() > 10 {
        out.push_str(&format!("  ... and {} more commits\n", commit_messages.len() - 10));
    }

    out
}

pub fn display_commit_analysis(commit_messages: &[String], latest_tag: Option<&str>) {
    print!("{}", format_commit_analysis(commit_messages, latest_tag));
}

/// Summary of a decision: the bump, the version change and the tag.
pub fn format_decision(decision: &ReleaseDecision, tag: Option<&str>) -> String {
    let previous = decision
        .previous_version
        .map(|v| v.to_string())
        .unwrap_or_else(|| "none".to_string());

    match (decision.next_version, tag) {
        (Some(next), Some(tag)) => format!(
            "Release: {} bump, {} -> {} (tag {})",
            style(decision.bump).bold(),
            previous,
            style(next).green(),
            style(tag).cyan()
        ),
        (Some(next), None) => format!(
            "Release: {} bump, {} -> {}",
            style(decision.bump).bold(),
            previous,
            style(next).green()
        ),
        (None, _) => format!("No release: current version {}", previous),
    }
}

pub fn display_decision(decision: &ReleaseDecision, tag: Option<&str>) {
    println!("\n{}", format_decision(decision, tag));
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ReleaseDecisionEngine;
    use crate::domain::Version;

    #[test]
    fn test_display_helpers_do_not_panic() {
        display_error("test error");
        display_success("test success");
        display_status("test status");
    }

    #[test]
    fn test_commit_analysis_truncates() {
        let messages: Vec<String> = (0..12).map(|i| format!("fix: bug {}", i)).collect();
        let out = console::strip_ansi_codes(&format_commit_analysis(&messages, Some("v1.0.0")))
            .to_string();
        assert!(out.starts_with("12 commit(s) since v1.0.0"));
        assert!(out.contains("  10. fix: bug 9"));
        assert!(!out.contains("fix: bug 10"));
        assert!(out.contains("... and 2 more commits"));
    }

    #[test]
    fn test_commit_analysis_uses_header_only() {
        let messages = vec!["feat: x\n\nlong body".to_string()];
        let out = format_commit_analysis(&messages, None);
        assert!(out.contains("1. feat: x\n"));
        assert!(!out.contains("long body"));
    }

    #[test]
    fn test_format_decision() {
        let engine = ReleaseDecisionEngine::default();
        let release = engine
            .decide(&["feat: x"], Some(Version::new(1, 0, 0)))
            .unwrap();
        let text = console::strip_ansi_codes(&format_decision(&release, Some("v1.1.0"))).to_string();
        assert_eq!(text, "Release: minor bump, 1.0.0 -> 1.1.0 (tag v1.1.0)");

        let none = engine.decide(&["docs: x"], None).unwrap();
        assert_eq!(format_decision(&none, None), "No release: current version none");
    }
}
