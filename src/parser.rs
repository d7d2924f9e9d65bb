use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Variables parsed from an env file. Keeps first-insertion order so that
/// comparisons and sync output stay stable; duplicate keys overwrite the
/// stored value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvVars {
    entries: Vec<(String, String)>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for EnvVars {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse `KEY=VALUE` content into a variable mapping.
///
/// Blank lines and `#` comment lines are skipped. Lines without a `=`, or
/// with `=` in the first position, are skipped entirely rather than stored
/// as empty keys. One layer of matching surrounding quotes is stripped from
/// values. There is no escape handling, multi-line support, or interpolation.
pub fn parse_env_content(content: &str) -> EnvVars {
    let mut vars = EnvVars::new();

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(eq_index) = trimmed.find('=') else {
            continue;
        };
        if eq_index == 0 {
            continue;
        }

        let key = trimmed[..eq_index].trim();
        let value = trimmed[eq_index + 1..].trim();
        let value = strip_quotes(value);

        vars.insert(key.to_string(), value.to_string());
    }

    vars
}

fn strip_quotes(value: &str) -> &str {
    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));

    if quoted {
        if value.len() >= 2 {
            &value[1..value.len() - 1]
        } else {
            ""
        }
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let vars = parse_env_content("KEY=value\nANOTHER=test");

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("KEY"), Some("value"));
        assert_eq!(vars.get("ANOTHER"), Some("test"));
    }

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let content = "\n# A comment\nKEY=value\n\n   # indented comment\nOTHER=1\n";
        let vars = parse_env_content(content);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("KEY"), Some("value"));
        assert_eq!(vars.get("OTHER"), Some("1"));
    }

    #[test]
    fn test_skips_malformed_lines() {
        // No '=' at all, and '=' in first position: both skipped, never
        // stored as empty-valued keys.
        let content = "API_KEY\n=value\nVALID=ok\n";
        let vars = parse_env_content(content);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("VALID"), Some("ok"));
        assert!(!vars.contains_key("API_KEY"));
    }

    #[test]
    fn test_empty_value_is_distinct_from_absent_key() {
        let vars = parse_env_content("EMPTY=\nSET=x");

        assert!(vars.contains_key("EMPTY"));
        assert_eq!(vars.get("EMPTY"), Some(""));
        assert_eq!(vars.get("MISSING"), None);
    }

    #[test]
    fn test_strips_one_layer_of_matching_quotes() {
        let content = "A=\"quoted\"\nB='single'\nC=\"'nested'\"\nD=\"unmatched'\n";
        let vars = parse_env_content(content);

        assert_eq!(vars.get("A"), Some("quoted"));
        assert_eq!(vars.get("B"), Some("single"));
        assert_eq!(vars.get("C"), Some("'nested'"));
        assert_eq!(vars.get("D"), Some("\"unmatched'"));
    }

    #[test]
    fn test_value_keeps_inline_hash() {
        // Only full-line comments are recognized.
        let vars = parse_env_content("KEY=value # not a comment");
        assert_eq!(vars.get("KEY"), Some("value # not a comment"));
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let vars = parse_env_content("KEY=first\nOTHER=x\nKEY=second");

        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("KEY"), Some("second"));
        // First insertion position is kept.
        assert_eq!(vars.keys().next(), Some("KEY"));
    }

    #[test]
    fn test_whitespace_around_key_and_value() {
        let vars = parse_env_content("  KEY  =  value  ");
        assert_eq!(vars.get("KEY"), Some("value"));
    }

    #[test]
    fn test_serializes_as_json_object() {
        let vars = parse_env_content("B=2\nA=1");
        let json = serde_json::to_string(&vars).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }
}
