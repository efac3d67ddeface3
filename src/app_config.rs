//! Config file loading for run defaults.
//!
//! The file is a flat list of `key = value` lines: strings double-quoted,
//! integers bare, booleans `true`/`false`, `#` starts a comment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Values read from the config file. `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FileConfig {
    pub(crate) client_id: Option<String>,
    pub(crate) client_secret: Option<String>,
    pub(crate) token_url: Option<String>,
    pub(crate) scope: Option<String>,
    pub(crate) catalog_url: Option<String>,
    pub(crate) limit: Option<u32>,
    pub(crate) lookback_days: Option<u32>,
    /// Repeatable; each occurrence adds one holding symbol.
    pub(crate) held_by_symbols: Vec<String>,
    pub(crate) item_type: Option<String>,
    pub(crate) order_by: Option<String>,
    pub(crate) topic: Option<String>,
    pub(crate) rows: Option<u16>,
    pub(crate) columns: Option<u16>,
    pub(crate) cover_width: Option<u32>,
    pub(crate) cover_height: Option<u32>,
    pub(crate) use_primary_lookup: Option<bool>,
    pub(crate) primary_lookup_url: Option<String>,
    pub(crate) secondary_lookup_url: Option<String>,
    pub(crate) placeholder_url: Option<String>,
    pub(crate) default_cover_path: Option<PathBuf>,
    pub(crate) link_template: Option<String>,
    pub(crate) page_title: Option<String>,
    pub(crate) http_connect_timeout_secs: Option<u64>,
    pub(crate) http_timeout_secs: Option<u64>,
    pub(crate) secondary_timeout_secs: Option<u64>,
    pub(crate) cover_concurrency: Option<usize>,
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/newshelf/config.toml`
/// 2. `$HOME/.config/newshelf/config.toml`
#[must_use]
pub(crate) fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("newshelf")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("newshelf")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, `Ok(None)` is returned.
pub(crate) fn load_file_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = explicit {
        return read_file_config(path).map(Some);
    }

    match resolve_default_config_path() {
        Some(path) if path.exists() => read_file_config(&path).map(Some),
        _ => Ok(None),
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "client_id" => cfg.client_id = Some(parse_string_literal(value).with_context(invalid)?),
            "client_secret" => {
                cfg.client_secret = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "token_url" => cfg.token_url = Some(parse_string_literal(value).with_context(invalid)?),
            "scope" => cfg.scope = Some(parse_string_literal(value).with_context(invalid)?),
            "catalog_url" => {
                cfg.catalog_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "limit" => cfg.limit = Some(parse_ranged(value, 1, 50).with_context(invalid)?),
            "lookback_days" => {
                cfg.lookback_days = Some(parse_ranged(value, 1, 365).with_context(invalid)?);
            }
            "held_by_symbol" => cfg
                .held_by_symbols
                .push(parse_string_literal(value).with_context(invalid)?),
            "item_type" => cfg.item_type = Some(parse_string_literal(value).with_context(invalid)?),
            "order_by" => cfg.order_by = Some(parse_string_literal(value).with_context(invalid)?),
            "topic" => cfg.topic = Some(parse_string_literal(value).with_context(invalid)?),
            "rows" => cfg.rows = Some(parse_ranged(value, 1, 100).with_context(invalid)?),
            "columns" => cfg.columns = Some(parse_ranged(value, 1, 100).with_context(invalid)?),
            "cover_width" => {
                cfg.cover_width = Some(parse_ranged(value, 1, 2000).with_context(invalid)?);
            }
            "cover_height" => {
                cfg.cover_height = Some(parse_ranged(value, 1, 2000).with_context(invalid)?);
            }
            "use_primary_lookup" => {
                cfg.use_primary_lookup = Some(parse_boolean(value).with_context(invalid)?);
            }
            "primary_lookup_url" => {
                cfg.primary_lookup_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "secondary_lookup_url" => {
                cfg.secondary_lookup_url =
                    Some(parse_string_literal(value).with_context(invalid)?);
            }
            "placeholder_url" => {
                cfg.placeholder_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "default_cover_path" => {
                cfg.default_cover_path = Some(PathBuf::from(
                    parse_string_literal(value).with_context(invalid)?,
                ));
            }
            "link_template" => {
                cfg.link_template = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "page_title" => {
                cfg.page_title = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "http_connect_timeout_secs" => {
                cfg.http_connect_timeout_secs =
                    Some(parse_ranged(value, 1, 3600).with_context(invalid)?);
            }
            "http_timeout_secs" => {
                cfg.http_timeout_secs = Some(parse_ranged(value, 1, 3600).with_context(invalid)?);
            }
            "secondary_timeout_secs" => {
                cfg.secondary_timeout_secs =
                    Some(parse_ranged(value, 1, 3600).with_context(invalid)?);
            }
            "cover_concurrency" => {
                cfg.cover_concurrency = Some(parse_ranged(value, 1, 16).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

/// Parses an integer and checks it against `min..=max`.
fn parse_ranged<T: TryFrom<u64>>(raw_value: &str, min: u64, max: u64) -> Result<T> {
    let value = parse_integer_u64(raw_value)?;
    if !(min..=max).contains(&value) {
        bail!("{value} is out of range. Expected range: {min}..={max}");
    }
    T::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range"))
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
client_id = "abc"
rows = 8
columns = 6
"#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.client_id.as_deref(), Some("abc"));
        assert_eq!(cfg.rows, Some(8));
        assert_eq!(cfg.columns, Some(6));
        assert!(cfg.client_secret.is_none());
    }

    #[test]
    fn test_parse_config_every_key() {
        let cfg = parse_config_str(
            r#"
client_id = "id"
client_secret = "secret"
token_url = "https://auth.example/token"
scope = "new-titles"
catalog_url = "https://api.example/new-titles"
limit = 50
lookback_days = 14
held_by_symbol = "ABC"
held_by_symbol = "DEF"
item_type = "book"
order_by = "DateAddedDsc"
topic = "history"
rows = 8
columns = 6
cover_width = 128
cover_height = 184
use_primary_lookup = false
primary_lookup_url = "http://covers.example"
secondary_lookup_url = "http://books.example"
placeholder_url = "http://covers.example/none.png"
default_cover_path = "/srv/newshelf/cover.png"
link_template = "https://catalog.example/{oclc}"
page_title = "Recent Arrivals"
http_connect_timeout_secs = 5
http_timeout_secs = 20
secondary_timeout_secs = 3
cover_concurrency = 4
"#,
        )
        .expect("full config should parse");
        assert_eq!(cfg.limit, Some(50));
        assert_eq!(cfg.lookback_days, Some(14));
        assert_eq!(cfg.held_by_symbols, ["ABC", "DEF"]);
        assert_eq!(cfg.topic.as_deref(), Some("history"));
        assert_eq!(cfg.cover_width, Some(128));
        assert_eq!(cfg.cover_height, Some(184));
        assert_eq!(cfg.use_primary_lookup, Some(false));
        assert_eq!(
            cfg.default_cover_path,
            Some(PathBuf::from("/srv/newshelf/cover.png"))
        );
        assert_eq!(cfg.page_title.as_deref(), Some("Recent Arrivals"));
        assert_eq!(cfg.secondary_timeout_secs, Some(3));
        assert_eq!(cfg.cover_concurrency, Some(4));
    }

    #[test]
    fn test_parse_config_rejects_limit_out_of_range() {
        let err = parse_config_str("limit = 51").expect_err("limit above 50 should be rejected");
        let message = format!("{err:#}");
        assert!(message.contains("limit"));
        assert!(message.contains("line 1"));
        assert!(message.contains("1..=50"));
    }

    #[test]
    fn test_parse_config_rejects_zero_columns() {
        let err = parse_config_str("\ncolumns = 0").expect_err("zero columns should be rejected");
        assert!(err.to_string().contains("`columns` value on line 2"));
    }

    #[test]
    fn test_parse_config_rejects_numeric_values_with_trailing_tokens() {
        let err = parse_config_str("rows = 4 trailing").expect_err("expected trailing token error");
        assert!(err.to_string().contains("rows"));
    }

    #[test]
    fn test_parse_config_rejects_negative_values() {
        let err = parse_config_str("cover_concurrency = -1").expect_err("negative rejected");
        assert!(format!("{err:#}").contains("non-negative"));
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
page_title = "Books # new" # heading
rows = 4 # short display
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.page_title.as_deref(), Some("Books # new"));
        assert_eq!(cfg.rows, Some(4));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("client_id = abc").expect_err("unquoted string rejected");
        assert!(err.to_string().contains("client_id"));
    }

    #[test]
    fn test_parse_config_rejects_invalid_boolean() {
        let err = parse_config_str("use_primary_lookup = yes").expect_err("invalid boolean");
        assert!(err.to_string().contains("use_primary_lookup"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("rows 4").expect_err("syntax error expected");
        assert!(err.to_string().contains("expected key = value"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys() {
        let err = parse_config_str("unknown_key = 123").expect_err("unknown key error expected");
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("unknown_key"));
    }

    #[test]
    fn test_load_file_config_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_file_config(Some(&dir.path().join("absent.toml")))
            .expect_err("missing explicit config should fail");
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_file_config_explicit_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "lookback_days = 7\n").expect("write config");
        let cfg = load_file_config(Some(&path))
            .expect("config should load")
            .expect("config present");
        assert_eq!(cfg.lookback_days, Some(7));
    }
}
