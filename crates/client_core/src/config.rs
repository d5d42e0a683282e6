use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "wordle.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub request_timeout: Duration,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout: Duration::from_secs(10),
            log_filter: "info".into(),
        }
    }
}

impl ClientSettings {
    /// Base URL with a trailing slash so `api/...` joins under it.
    pub fn base_url(&self) -> anyhow::Result<Url> {
        parse_base_url(&self.server_url)
    }
}

/// Defaults, then `wordle.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();
    let file = Path::new(SETTINGS_FILE);
    if let Ok(raw) = fs::read_to_string(file) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!("ignoring unreadable {SETTINGS_FILE}: {err}");
            return;
        }
    };
    if let Some(v) = file_cfg.get("server_url") {
        settings.server_url = v.clone();
    }
    if let Some(v) = file_cfg.get("request_timeout_ms") {
        set_timeout(settings, "request_timeout_ms", v);
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("WORDLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_MS") {
        set_timeout(settings, "APP__REQUEST_TIMEOUT_MS", &v);
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

fn set_timeout(settings: &mut ClientSettings, source: &str, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => settings.request_timeout = Duration::from_millis(ms),
        _ => warn!("ignoring {source}={raw:?}: expected a positive number of milliseconds"),
    }
}

pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&with_slash).with_context(|| format!("invalid server url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("server url '{raw}' must use http or https");
    }
    Ok(url)
}
