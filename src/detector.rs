use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::{parse_env_content, EnvVars};

/// File name patterns recognized as env files.
pub const ENV_PATTERNS: [&str; 9] = [
    ".env",
    ".env.*",
    ".env.local",
    ".env.development",
    ".env.test",
    ".env.production",
    ".env.staging",
    ".env.example",
    ".env.defaults",
];

/// A parsed env file. Immutable after creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFile {
    pub path: PathBuf,
    pub name: String,
    pub variables: EnvVars,
    pub is_empty: bool,
}

/// Detect env files in a directory (non-recursive).
///
/// Files are matched against `ENV_PATTERNS` pattern by pattern, with names
/// sorted within each pattern, and deduplicated by resolved path so a file
/// matched by two patterns is parsed once.
pub fn detect_env_files(directory: &Path) -> Vec<EnvFile> {
    let mut names: Vec<String> = match fs::read_dir(directory) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect(),
        Err(_) => return Vec::new(),
    };
    names.sort();

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    for pattern in ENV_PATTERNS {
        for name in &names {
            if !matches_pattern(name, pattern) {
                continue;
            }

            let path = directory.join(name);
            let resolved = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if seen.insert(resolved) {
                files.push(parse_env_file(&path));
            }
        }
    }

    files
}

/// Parse a single env file. Read failures degrade to an empty `EnvFile`
/// rather than propagating an error.
pub fn parse_env_file(path: &Path) -> EnvFile {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let variables = match fs::read_to_string(path) {
        Ok(content) => parse_env_content(&content),
        Err(_) => EnvVars::new(),
    };

    EnvFile {
        path: path.to_path_buf(),
        name,
        is_empty: variables.is_empty(),
        variables,
    }
}

/// Find the template file: the first file named `.env.example` or ending
/// with `.example`.
pub fn find_example_file(files: &[EnvFile]) -> Option<&EnvFile> {
    files
        .iter()
        .find(|file| file.name == ".env.example" || file.name.ends_with(".example"))
}

/// Filter to the files relevant for a given environment mode.
pub fn environment_files<'a>(files: &'a [EnvFile], environment: &str) -> Vec<&'a EnvFile> {
    let mode_name = format!(".env.{environment}");

    files
        .iter()
        .filter(|file| file.name == mode_name || file.name == ".env.local" || file.name == ".env")
        .collect()
}

fn matches_pattern(name: &str, pattern: &str) -> bool {
    match pattern.find('*') {
        Some(star) => {
            let prefix = &pattern[..star];
            let suffix = &pattern[star + 1..];
            name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix)
        }
        None => name == pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detects_env_files_once() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "A=1\n").unwrap();
        // Matches both `.env.*` and `.env.local`; must be parsed once.
        fs::write(temp_dir.path().join(".env.local"), "B=2\n").unwrap();
        fs::write(temp_dir.path().join(".env.example"), "A=\nB=\n").unwrap();
        fs::write(temp_dir.path().join("config.json"), "{}").unwrap();

        let files = detect_env_files(temp_dir.path());

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![".env", ".env.example", ".env.local"]);
    }

    #[test]
    fn test_detect_missing_directory() {
        let files = detect_env_files(Path::new("/nonexistent/envmint-test"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_parse_failure_degrades_to_empty() {
        let file = parse_env_file(Path::new("/nonexistent/.env"));

        assert!(file.is_empty);
        assert_eq!(file.variables.len(), 0);
        assert_eq!(file.name, ".env");
    }

    #[test]
    fn test_find_example_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "A=1\n").unwrap();
        fs::write(temp_dir.path().join(".env.example"), "A=\n").unwrap();

        let files = detect_env_files(temp_dir.path());
        let example = find_example_file(&files).unwrap();
        assert_eq!(example.name, ".env.example");
    }

    #[test]
    fn test_find_example_file_none() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "A=1\n").unwrap();

        let files = detect_env_files(temp_dir.path());
        assert!(find_example_file(&files).is_none());
    }

    #[test]
    fn test_environment_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".env"), "A=1\n").unwrap();
        fs::write(temp_dir.path().join(".env.local"), "B=2\n").unwrap();
        fs::write(temp_dir.path().join(".env.production"), "C=3\n").unwrap();
        fs::write(temp_dir.path().join(".env.test"), "D=4\n").unwrap();

        let files = detect_env_files(temp_dir.path());
        let selected = environment_files(&files, "production");

        let names: Vec<&str> = selected.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&".env"));
        assert!(names.contains(&".env.local"));
        assert!(names.contains(&".env.production"));
        assert!(!names.contains(&".env.test"));
    }

    #[test]
    fn test_matches_pattern() {
        assert!(matches_pattern(".env", ".env"));
        assert!(matches_pattern(".env.local", ".env.*"));
        assert!(matches_pattern("staging.env", "*.env"));
        assert!(!matches_pattern(".env", ".env.*"));
        assert!(!matches_pattern(".environment", ".env"));
    }
}
