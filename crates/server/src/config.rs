use std::{collections::HashMap, fs};

use anyhow::Context;

pub const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".into(),
            openai_model: "gpt-3.5-turbo".into(),
            max_upload_bytes: 1024 * 1024,
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file(&mut settings, &raw).with_context(|| format!("invalid {CONFIG_FILE}"))?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: HashMap<String, toml::Value> = toml::from_str(raw)?;

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("openai_api_key").and_then(toml::Value::as_str) {
        settings.openai_api_key = Some(v.to_string());
    }
    if let Some(v) = file_cfg.get("openai_base_url").and_then(toml::Value::as_str) {
        settings.openai_base_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("openai_model").and_then(toml::Value::as_str) {
        settings.openai_model = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("max_upload_bytes")
        .and_then(toml::Value::as_integer)
    {
        settings.max_upload_bytes =
            usize::try_from(v).context("max_upload_bytes must not be negative")?;
    }

    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("OPENAI_API_KEY") {
        settings.openai_api_key = Some(v);
    }
    if let Some(v) = lookup("APP__OPENAI_API_KEY") {
        settings.openai_api_key = Some(v);
    }

    if let Some(v) = lookup("APP__OPENAI_BASE_URL") {
        settings.openai_base_url = v;
    }
    if let Some(v) = lookup("APP__OPENAI_MODEL") {
        settings.openai_model = v;
    }

    if let Some(v) = lookup("APP__MAX_UPLOAD_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_upload_bytes = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
