use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::parser::{parse_env_content, EnvVars};

/// Options for a sync run.
pub struct SyncOptions {
    pub source_file: PathBuf,
    pub target_file: PathBuf,
    pub preserve_existing: bool,
    pub fill_empty: bool,
}

impl SyncOptions {
    pub fn new(source_file: impl Into<PathBuf>, target_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            target_file: target_file.into(),
            preserve_existing: true,
            fill_empty: true,
        }
    }
}

/// Outcome of a sync run, with the keys grouped by how they were resolved.
#[derive(Debug, Clone, Serialize)]
pub struct SyncResult {
    pub success: bool,
    /// Keys copied from the template (the target had no value to keep).
    pub added: Vec<String>,
    /// Keys whose existing target value was kept, including target-only keys.
    pub preserved: Vec<String>,
    /// Keys filled with a `TODO_<KEY>` placeholder.
    pub filled: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Fill the target file with missing keys from the template.
///
/// Template keys come first in template order; keys present only in the
/// target are appended unchanged. The target file is overwritten entirely,
/// one `KEY=VALUE` line per key.
pub fn sync_env_file(options: &SyncOptions) -> Result<SyncResult, SyncError> {
    if !options.source_file.exists() {
        return Err(SyncError::SourceNotFound(options.source_file.clone()));
    }

    let template_content =
        fs::read_to_string(&options.source_file).map_err(|source| SyncError::Read {
            path: options.source_file.clone(),
            source,
        })?;
    let template = parse_env_content(&template_content);

    // An unreadable target degrades to an empty mapping.
    let existing = fs::read_to_string(&options.target_file)
        .map(|content| parse_env_content(&content))
        .unwrap_or_default();

    let mut merged = EnvVars::new();
    let mut added = Vec::new();
    let mut preserved = Vec::new();
    let mut filled = Vec::new();

    for (key, template_value) in template.iter() {
        if options.preserve_existing {
            if let Some(existing_value) = existing.get(key) {
                merged.insert(key.to_string(), existing_value.to_string());
                preserved.push(key.to_string());
                continue;
            }
        }

        if !template_value.is_empty() {
            merged.insert(key.to_string(), template_value.to_string());
            added.push(key.to_string());
        } else if options.fill_empty {
            merged.insert(key.to_string(), format!("TODO_{key}"));
            filled.push(key.to_string());
        } else {
            merged.insert(key.to_string(), String::new());
            added.push(key.to_string());
        }
    }

    for (key, value) in existing.iter() {
        if !template.contains_key(key) {
            merged.insert(key.to_string(), value.to_string());
            preserved.push(key.to_string());
        }
    }

    let output: String = merged
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect();

    fs::write(&options.target_file, output).map_err(|source| SyncError::Write {
        path: options.target_file.clone(),
        source,
    })?;

    Ok(SyncResult {
        success: true,
        added,
        preserved,
        filled,
    })
}

/// Render a sync result for the console.
pub fn format_sync_result(result: &SyncResult) -> String {
    let mut output = vec![format!("{}", "Sync result:".bold())];

    output.push(format!(
        "  {} {} key(s) added from template",
        "+".green(),
        result.added.len()
    ));
    output.push(format!(
        "  {} {} key(s) preserved",
        "=".blue(),
        result.preserved.len()
    ));
    output.push(format!(
        "  {} {} key(s) filled with TODO_ placeholders",
        "!".yellow(),
        result.filled.len()
    ));

    for key in &result.filled {
        output.push(format!("      {} {}", "•".yellow(), key));
    }

    output.join("\n")
}
