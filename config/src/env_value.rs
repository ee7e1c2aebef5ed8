//! Typed reads of process environment variables.
//!
//! Unset and blank (whitespace-only) variables are treated alike: `Ok(None)`. A value that
//! is present but does not parse is an error naming the key, never a silent default.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("{key}={value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Trimmed value of `key`, or `None` when unset, blank or not valid unicode.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses `key` with [`FromStr`].
pub fn env_parse<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = env_string(key) else {
        return Ok(None);
    };
    raw.parse::<T>().map(Some).map_err(|e| EnvError::Invalid {
        key: key.to_string(),
        reason: e.to_string(),
        value: raw,
    })
}

/// Accepts `1/true/yes/on` and `0/false/no/off`, case-insensitively.
pub fn env_bool(key: &str) -> Result<Option<bool>, EnvError> {
    let Some(raw) = env_string(key) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvError::Invalid {
            key: key.to_string(),
            value: raw,
            reason: "expected a boolean".to_string(),
        }),
    }
}
