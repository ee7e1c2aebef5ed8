//! `[env]` table of `<config dir>/<app>/config.toml`.
//!
//! The config dir is `$XDG_CONFIG_HOME` when set and non-empty, else the platform default
//! from [`dirs::config_dir`]. Scalars in the table are stringified (`WEFT_STEP_LIMIT = 25`
//! and `WEFT_STEP_LIMIT = "25"` are equivalent); arrays and tables are rejected.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::LoadError;

pub(crate) fn config_home() -> Option<PathBuf> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir(),
    }
}

/// Path of the app's config file, whether or not it exists.
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    config_home().map(|dir| dir.join(app_name).join("config.toml"))
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, toml::Value>,
}

fn scalar_to_string(key: &str, value: toml::Value) -> Result<String, LoadError> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(LoadError::UnsupportedValue {
            key: key.to_string(),
            kind: other.type_str(),
        }),
    }
}

/// Missing config dir, missing file or missing `[env]` all yield an empty map.
pub(crate) fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = config_path(app_name).filter(|p| p.is_file()) else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(&path).map_err(|source| LoadError::XdgRead {
        path: path.clone(),
        source,
    })?;
    let file: ConfigFile =
        toml::from_str(&content).map_err(|source| LoadError::XdgParse { path, source })?;
    file.env
        .into_iter()
        .map(|(k, v)| scalar_to_string(&k, v).map(|s| (k, s)))
        .collect()
}
