//! Run settings read from the environment.
//!
//! Binaries call [`env_config::load_and_apply`] first (so `.env` and the XDG
//! `config.toml` land in the environment), then [`RunSettings::from_env`].
//!
//! | variable           | field         |
//! |--------------------|---------------|
//! | `WEFT_MODEL`       | `model`       |
//! | `WEFT_MAX_TOKENS`  | `max_tokens`  |
//! | `WEFT_TEMPERATURE` | `temperature` |
//! | `WEFT_STEP_LIMIT`  | `step_limit`  |

use env_config::{env_parse, env_string, EnvError};

use crate::graph::RunConfig;
use crate::llm::GenerationOptions;

pub const ENV_MODEL: &str = "WEFT_MODEL";
pub const ENV_MAX_TOKENS: &str = "WEFT_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "WEFT_TEMPERATURE";
pub const ENV_STEP_LIMIT: &str = "WEFT_STEP_LIMIT";

/// Unset fields keep the library defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSettings {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub step_limit: Option<usize>,
}

impl RunSettings {
    /// Reads the `WEFT_*` variables. A set but unparsable value is an error.
    pub fn from_env() -> Result<Self, EnvError> {
        let settings = Self {
            model: env_string(ENV_MODEL),
            max_tokens: env_parse(ENV_MAX_TOKENS)?,
            temperature: env_parse(ENV_TEMPERATURE)?,
            step_limit: env_parse(ENV_STEP_LIMIT)?,
        };
        tracing::debug!(?settings, "run settings loaded");
        Ok(settings)
    }

    /// Fills `temperature` when `WEFT_TEMPERATURE` was not set.
    pub fn with_default_temperature(mut self, temperature: f32) -> Self {
        self.temperature.get_or_insert(temperature);
        self
    }

    /// Default options overridden by whatever is set.
    pub fn generation_options(&self) -> GenerationOptions {
        let mut options = GenerationOptions::default();
        if let Some(model) = &self.model {
            options = options.with_model(model.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            options = options.with_temperature(temperature);
        }
        options
    }

    /// Per-run config carrying `step_limit` when set.
    pub fn run_config(&self) -> RunConfig {
        let config = RunConfig::default();
        match self.step_limit {
            Some(limit) => config.with_step_limit(limit),
            None => config,
        }
    }
}
