use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Ignore rules that cover env files. A `.gitignore` is considered adequate
/// if any of its lines equals or contains one of these.
pub const ENV_IGNORE_PATTERNS: [&str; 7] = [
    ".env",
    ".env.local",
    ".env.*.local",
    ".env.production",
    ".env.staging",
    "*.env",
    ".env*",
];

/// Template files that are meant to stay tracked.
const TRACKED_TEMPLATES: [&str; 2] = [".env.example", ".env.defaults"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitIgnoreStatus {
    pub is_properly_ignored: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedFilesStatus {
    pub tracked_files: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check whether `.gitignore` in the given directory covers env files.
/// Never fails: a missing or unreadable file is reported as a warning.
pub fn check_gitignore(directory: &Path) -> GitIgnoreStatus {
    let gitignore_path = directory.join(".gitignore");
    let mut warnings = Vec::new();

    if !gitignore_path.exists() {
        warnings.push("No .gitignore file found".to_string());
        return GitIgnoreStatus {
            is_properly_ignored: false,
            warnings,
        };
    }

    let content = fs::read_to_string(&gitignore_path).unwrap_or_default();
    let lines: Vec<&str> = content.lines().map(str::trim).collect();

    let has_env_patterns = ENV_IGNORE_PATTERNS
        .iter()
        .any(|pattern| lines.iter().any(|line| line == pattern || line.contains(pattern)));

    if !has_env_patterns {
        warnings.push("No .env patterns found in .gitignore".to_string());
    }

    for pattern in TRACKED_TEMPLATES {
        if lines.contains(&pattern) {
            warnings.push(format!(
                "Pattern '{pattern}' should not be in .gitignore (it's a template file)"
            ));
        }
    }

    GitIgnoreStatus {
        is_properly_ignored: has_env_patterns && warnings.is_empty(),
        warnings,
    }
}

/// Check for env files tracked by git. This is a stated no-op: it always
/// reports the inability to check, since no git commands are run.
pub fn check_tracked_files(_directory: &Path) -> TrackedFilesStatus {
    TrackedFilesStatus {
        tracked_files: Vec::new(),
        warnings: vec!["Git tracking check requires git command execution".to_string()],
    }
}

/// Render git warnings with the standing recommendations.
pub fn format_git_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }

    let mut output = format!("\n{}", "⚠️  Git Integration Warnings:".yellow().bold());

    for warning in warnings {
        output.push_str(&format!("\n  {} {}", "•".yellow(), warning));
    }

    output.push_str(&format!("\n\n{}", "💡 Recommendations:".blue()));
    output.push_str(&format!(
        "\n  {} Add .env* to your .gitignore file",
        "•".blue()
    ));
    output.push_str(&format!(
        "\n  {} Keep .env.example and .env.defaults in version control",
        "•".blue()
    ));
    output.push_str(&format!(
        "\n  {} Never commit actual secrets to git",
        "•".blue()
    ));

    output
}
