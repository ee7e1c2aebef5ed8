//! Project `.env` file: `KEY=VALUE` lines, read into a map. Applying to the process
//! environment happens in the crate root.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `.env` in `override_dir` if given, else in the current directory. `None` when absent.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// One `.env` line as `(key, value)`, or `None` for blanks, comments and malformed lines.
///
/// * An optional `export ` prefix is accepted.
/// * `"double"` quotes are stripped and `\"` unescaped; `'single'` quotes are stripped verbatim.
/// * In unquoted values, ` #` starts a trailing comment. A `#` with no space before it is kept.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, raw) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let raw = raw.trim();
    let value = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        raw[1..raw.len() - 1].replace("\\\"", "\"")
    } else if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        raw[1..raw.len() - 1].to_string()
    } else {
        match raw.find(" #") {
            Some(i) => raw[..i].trim_end().to_string(),
            None => raw.to_string(),
        }
    };
    Some((key.to_string(), value))
}

/// Later duplicates win.
pub(crate) fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Missing file yields an empty map.
pub(crate) fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(&path)
        .map_err(|source| LoadError::DotenvRead { path, source })?;
    Ok(parse_dotenv(&content))
}
