//! Configuration for weft binaries and demos.
//!
//! [`load_and_apply`] reads the XDG `config.toml` `[env]` table and the project `.env`,
//! then sets process environment variables with priority **existing env > .env > XDG**.
//! Library code never reads files: it reads the environment through the typed getters
//! ([`env_string`], [`env_parse`], [`env_bool`]).
//!
//! With the `tracing-init` feature, [`init_tracing`] installs a stderr fmt subscriber
//! filtered by `RUST_LOG`.

mod dotenv;
mod env_value;
#[cfg(feature = "tracing-init")]
mod tracing_init;
mod xdg_toml;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use env_value::{env_bool, env_parse, env_string, EnvError};
#[cfg(feature = "tracing-init")]
pub use tracing_init::{init_tracing, TracingInitError};
pub use xdg_toml::config_path;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read {}: {source}", path.display())]
    XdgRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    XdgParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("[env] {key}: expected a string, number or boolean, found {kind}")]
    UnsupportedValue { key: String, kind: &'static str },
    #[error("read {}: {source}", path.display())]
    DotenvRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where an applied value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Dotenv,
    Xdg,
}

/// Outcome of [`load_and_apply`]. Values are never recorded, only key names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Keys that were set, with their source.
    pub applied: BTreeMap<String, Source>,
    /// Keys present in a file but left alone because the process already had them.
    pub kept_from_env: Vec<String>,
}

/// Loads XDG `config.toml` and the project `.env`, then sets every key that is **not**
/// already present in the process environment.
///
/// * `app_name`: e.g. `"weft"`, giving `$XDG_CONFIG_HOME/weft/config.toml`.
/// * `override_dir`: look for `.env` here instead of the current directory.
///
/// Missing files are not an error. An unreadable or malformed file is.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<LoadReport, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir)?;

    let keys: HashSet<&String> = xdg_map.keys().chain(dotenv_map.keys()).collect();
    let mut report = LoadReport::default();
    for key in keys {
        if std::env::var_os(key).is_some() {
            report.kept_from_env.push(key.clone());
            continue;
        }
        let (value, source) = match dotenv_map.get(key) {
            Some(v) => (v, Source::Dotenv),
            None => match xdg_map.get(key) {
                Some(v) => (v, Source::Xdg),
                None => continue,
            },
        };
        std::env::set_var(key, value);
        report.applied.insert(key.clone(), source);
    }
    report.kept_from_env.sort();
    Ok(report)
}
