//! Shared setup for the weft demos.
//!
//! Every demo runs offline against a scripted [`MockLlm`] unless `ANTHROPIC_API_KEY` is
//! set (in the environment, a project `.env`, or `~/.config/weft/config.toml`).

use std::error::Error;
use std::sync::Arc;

use weft::{ChatAnthropic, LlmClient, MockLlm, RunSettings};

pub const APP_NAME: &str = "weft";

/// Loads `.env` and XDG config into the environment, installs the stderr subscriber
/// (`RUST_LOG`, default `weft=info`) and reads the `WEFT_*` run settings.
pub fn init() -> Result<RunSettings, Box<dyn Error>> {
    let report = config::load_and_apply(APP_NAME, None)?;
    // a subscriber installed by the host is fine
    let _ = config::init_tracing("weft=info");
    tracing::debug!(applied = ?report.applied.keys().collect::<Vec<_>>(), "config applied");
    Ok(RunSettings::from_env()?)
}

/// The Anthropic client when a key is configured, otherwise `offline`.
pub fn model_or(offline: MockLlm) -> Arc<dyn LlmClient> {
    match ChatAnthropic::from_env() {
        Ok(client) => {
            tracing::info!("using the Anthropic Messages API");
            Arc::new(client)
        }
        Err(e) => {
            tracing::info!(reason = %e, "no API key, using the scripted model");
            Arc::new(offline)
        }
    }
}
