//! `KEY=VALUE` env file parsing.
//!
//! # Responsibilities
//! - Parse dotenv-style file contents into a flat mapping
//! - Tolerate blank lines, comments and malformed lines
//! - Unwrap quoted values
//!
//! # Design Decisions
//! - Malformed lines are skipped, never an error: a partially readable
//!   file still contributes what it can
//! - Last assignment wins on duplicate keys (matches merge semantics)

use crate::env::types::AppEnvVars;

/// Parse dotenv-style content into a mapping.
///
/// Recognized syntax per line:
/// - `KEY=VALUE`, whitespace around key and value trimmed
/// - an optional `export ` prefix before the key
/// - values wrapped in matching single or double quotes are unwrapped
/// - blank lines and lines starting with `#` are ignored
///
/// Lines without a `=` or with an empty key are skipped.
pub fn parse(content: &str) -> AppEnvVars {
    let mut vars = AppEnvVars::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        let key = key.strip_prefix("export ").map(str::trim).unwrap_or(key);
        if key.is_empty() {
            continue;
        }

        vars.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    vars
}

/// Strip one pair of matching surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        let first = value.as_bytes()[0];
        let last = value.as_bytes()[value.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_assignments() {
        let vars = parse("DB_HOST=localhost\nDB_PORT=5432\n");
        assert_eq!(vars["DB_HOST"], "localhost");
        assert_eq!(vars["DB_PORT"], "5432");
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let vars = parse("\n# a comment\nKEY=value\n\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["KEY"], "value");
    }

    #[test]
    fn unwraps_quoted_values() {
        let vars = parse("SINGLE='test1.localhost'\nDOUBLE=\"spaced value\"\n");
        assert_eq!(vars["SINGLE"], "test1.localhost");
        assert_eq!(vars["DOUBLE"], "spaced value");
    }

    #[test]
    fn keeps_mismatched_quotes_verbatim() {
        let vars = parse("KEY='oops\"\n");
        assert_eq!(vars["KEY"], "'oops\"");
    }

    #[test]
    fn trims_whitespace_around_key_and_value() {
        let vars = parse("  DB_HOST = test1.localhost \n");
        assert_eq!(vars["DB_HOST"], "test1.localhost");
    }

    #[test]
    fn strips_export_prefix() {
        let vars = parse("export PATH_EXTRA=/opt/bin\n");
        assert_eq!(vars["PATH_EXTRA"], "/opt/bin");
    }

    #[test]
    fn skips_malformed_lines() {
        let vars = parse("not an assignment\n=nokey\nKEY=value\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars["KEY"], "value");
    }

    #[test]
    fn empty_value_is_allowed() {
        let vars = parse("ISOLATED_ENV=\n");
        assert_eq!(vars["ISOLATED_ENV"], "");
    }

    #[test]
    fn last_duplicate_wins() {
        let vars = parse("KEY=first\nKEY=second\n");
        assert_eq!(vars["KEY"], "second");
    }
}
