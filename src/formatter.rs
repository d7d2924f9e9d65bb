use colored::{ColoredString, Colorize};

use crate::validator::{SecurityIssue, Severity, ValidationResult};

const BANNER_WIDTH: usize = 62;

/// Rendering options for the summary output.
#[derive(Debug, Default)]
pub struct FormatOptions {
    pub verbose: bool,
}

/// Render validation results as the default human-readable summary:
/// banner, aggregate stats, per-file details, then security issues.
/// Values flow through unmodified; no validation logic lives here.
pub fn format_results(results: &[ValidationResult], options: &FormatOptions) -> String {
    let mut output = vec![format_header()];

    output.push(format_summary(results));

    for result in results {
        output.push(format_file_result(result, options.verbose));
    }

    let all_issues: Vec<&SecurityIssue> = results
        .iter()
        .flat_map(|r| r.comparison.security_issues.iter())
        .collect();
    if !all_issues.is_empty() {
        output.push(format_security_warnings(&all_issues));
    }

    output.join("\n")
}

/// Serialize results as a pretty-printed JSON array.
pub fn format_json(results: &[ValidationResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Render results as a fixed-width table.
pub fn format_table(results: &[ValidationResult]) -> String {
    let mut output = Vec::new();

    output.push("┌─────────────────┬───────────┬───────┬─────────┬────────┐".to_string());
    output.push("│ File            │ Status    │ Score │ Missing │ Issues │".to_string());
    output.push("├─────────────────┼───────────┼───────┼─────────┼────────┤".to_string());

    for result in results {
        let status = if result.is_valid { "valid" } else { "invalid" };
        let issues = result.comparison.empty.len() + result.comparison.suspicious.len();

        output.push(format!(
            "│ {:<15} │ {:<9} │ {:>5} │ {:>7} │ {:>6} │",
            truncate(&result.file.name, 15),
            status,
            result.score,
            result.comparison.missing.len(),
            issues,
        ));
    }

    output.push("└─────────────────┴───────────┴───────┴─────────┴────────┘".to_string());

    output.join("\n")
}

fn format_header() -> String {
    let title = format!("envmint v{}", env!("CARGO_PKG_VERSION"));
    let subtitle = "Environment Variables Validator";

    format!(
        "\n╔{border}╗\n║{title:^width$}║\n║{subtitle:^width$}║\n╚{border}╝\n",
        border = "═".repeat(BANNER_WIDTH),
        width = BANNER_WIDTH,
    )
    .blue()
    .bold()
    .to_string()
}

fn format_summary(results: &[ValidationResult]) -> String {
    let total = results.len();
    let valid = results.iter().filter(|r| r.is_valid).count();
    let invalid = total - valid;
    let avg_score = if total == 0 {
        0.0
    } else {
        results.iter().map(|r| r.score as f64).sum::<f64>() / total as f64
    };

    let status = if invalid == 0 {
        "✅ All files are valid".green().to_string()
    } else {
        format!("❌ {invalid} file(s) have issues").red().to_string()
    };

    format!(
        "\n{}\n  {} {}\n  {} {} {} {}\n  {} {}\n  {} {}\n",
        "📊 Summary:".bold(),
        "Files checked:".dimmed(),
        total,
        "Valid files:".dimmed(),
        valid.to_string().green(),
        "/".dimmed(),
        invalid.to_string().red(),
        "Average score:".dimmed(),
        format_score(avg_score.round() as u8),
        "Status:".dimmed(),
        status,
    )
}

fn format_file_result(result: &ValidationResult, verbose: bool) -> String {
    let status = if result.is_valid {
        "✅ Valid".green().to_string()
    } else {
        "❌ Issues found".red().to_string()
    };

    let mut output = format!(
        "\n{} {} {}\n{}",
        format!("📄 {}", result.file.name).bold(),
        status,
        format_score(result.score),
        format!("   Path: {}", result.file.path.display()).dimmed(),
    );

    if !result.is_valid || verbose {
        let comparison = &result.comparison;

        if !comparison.missing.is_empty() {
            output.push_str(&format!("\n  {}", "❌ Missing variables:".red()));
            for key in &comparison.missing {
                output.push_str(&format!("\n    {} {}", "•".red(), key.yellow()));
            }
        }

        if !comparison.extra.is_empty() {
            output.push_str(&format!("\n  {}", "⚠️  Extra variables:".yellow()));
            for key in &comparison.extra {
                output.push_str(&format!("\n    {} {}", "•".yellow(), key.dimmed()));
            }
        }

        if !comparison.empty.is_empty() {
            output.push_str(&format!("\n  {}", "🔴 Empty variables:".red()));
            for key in &comparison.empty {
                output.push_str(&format!("\n    {} {}", "•".red(), key.yellow()));
            }
        }

        if !comparison.suspicious.is_empty() {
            output.push_str(&format!("\n  {}", "⚠️  Suspicious values:".yellow()));
            for key in &comparison.suspicious {
                let value = result.file.variables.get(key).unwrap_or_default();
                output.push_str(&format!(
                    "\n    {} {} = {}",
                    "•".yellow(),
                    key.dimmed(),
                    format!("\"{value}\"").red(),
                ));
            }
        }
    }

    output
}

fn format_security_warnings(issues: &[&SecurityIssue]) -> String {
    let mut output = format!("\n{}", "🚨 Security Issues:".red().bold());

    let sections: [(Severity, &str, fn(&str) -> ColoredString); 3] = [
        (Severity::High, "🔴 High Severity:", |s| s.red()),
        (Severity::Medium, "🟡 Medium Severity:", |s| s.yellow()),
        (Severity::Low, "🔵 Low Severity:", |s| s.blue()),
    ];

    for (severity, heading, color) in sections {
        let matching: Vec<&&SecurityIssue> =
            issues.iter().filter(|i| i.severity == severity).collect();
        if matching.is_empty() {
            continue;
        }

        output.push_str(&format!("\n  {}", color(heading)));
        for issue in matching {
            output.push_str(&format!(
                "\n    {} {}: {}",
                color("•"),
                issue.variable.yellow(),
                color(&issue.message),
            ));
        }
    }

    output
}

fn format_score(score: u8) -> String {
    let rendered = format!("{score}/100");

    if score >= 90 {
        rendered.green().to_string()
    } else if score >= 70 {
        rendered.yellow().to_string()
    } else {
        rendered.red().to_string()
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        let kept: String = name.chars().take(max - 1).collect();
        format!("{kept}…")
    }
}
