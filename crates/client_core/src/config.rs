use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;

pub const DEFAULT_CONFIG_FILE: &str = "summarizer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub backend_url: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".into(),
            request_timeout_secs: 60,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: HashMap<String, toml::Value> =
            toml::from_str(raw).context("invalid client config file")?;

        if let Some(v) = file_cfg.get("backend_url").and_then(toml::Value::as_str) {
            self.backend_url = v.to_string();
        }
        if let Some(v) = file_cfg
            .get("request_timeout_secs")
            .and_then(toml::Value::as_integer)
        {
            self.request_timeout_secs = u64::try_from(v)
                .context("request_timeout_secs must not be negative")?;
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SUMMARIZER_BACKEND_URL") {
            self.backend_url = v;
        }
        if let Some(v) = lookup("APP__BACKEND_URL") {
            self.backend_url = v;
        }

        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.request_timeout_secs = parsed;
            }
        }
    }
}

/// Defaults, then `path` (or `summarizer.toml` if it exists), then the
/// environment. An explicitly named file must exist.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            settings.apply_file(&raw)?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                settings.apply_file(&raw)?;
            }
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}
