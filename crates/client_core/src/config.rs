use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{GameType, Strategy};
use tracing::warn;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SETTINGS_FILE: &str = "akinator.toml";

const BASE_URL_ENV_VARS: [&str; 3] = [
    "REACT_APP_BASE_API_URL",
    "APP__BASE_API_URL",
    "AKINATOR_BASE_API_URL",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub game_type: GameType,
    pub strategy: Strategy,
    pub max_depth: Option<u32>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: 10,
            game_type: GameType::default(),
            strategy: Strategy::default(),
            max_depth: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    game_type: Option<String>,
    strategy: Option<String>,
    max_depth: Option<u32>,
}

/// Command-line values, applied last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub game_type: Option<GameType>,
    pub strategy: Option<Strategy>,
    pub max_depth: Option<u32>,
}

impl ClientSettings {
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) {
        if let Some(v) = overrides.base_url {
            self.base_url = v;
        }
        if let Some(v) = overrides.game_type {
            self.game_type = v;
        }
        if let Some(v) = overrides.strategy {
            self.strategy = v;
        }
        if overrides.max_depth.is_some() {
            self.max_depth = overrides.max_depth;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Parses and validates `base_url`. Always returns a URL whose path ends
    /// with `/` so endpoint segments append rather than replace.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.base_url)
    }

    fn apply_file(&mut self, file: SettingsFile) {
        if let Some(v) = file.base_url {
            self.base_url = v;
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file.game_type {
            self.set_game_type("game_type", &v);
        }
        if let Some(v) = file.strategy {
            self.set_strategy("strategy", &v);
        }
        if let Some(v) = file.max_depth {
            self.max_depth = Some(v);
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let read = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        for name in BASE_URL_ENV_VARS {
            if let Some(v) = read(name) {
                self.base_url = v;
            }
        }
        if let Some(v) = read("APP__REQUEST_TIMEOUT_SECS") {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = parsed,
                Err(err) => warn!(value = %v, "ignoring APP__REQUEST_TIMEOUT_SECS: {err}"),
            }
        }
        if let Some(v) = read("APP__GAME_TYPE") {
            self.set_game_type("APP__GAME_TYPE", &v);
        }
        if let Some(v) = read("APP__STRATEGY") {
            self.set_strategy("APP__STRATEGY", &v);
        }
        if let Some(v) = read("APP__MAX_DEPTH") {
            match v.trim().parse::<u32>() {
                Ok(parsed) => self.max_depth = Some(parsed),
                Err(err) => warn!(value = %v, "ignoring APP__MAX_DEPTH: {err}"),
            }
        }
    }

    fn set_game_type(&mut self, source: &str, raw: &str) {
        match raw.parse::<GameType>() {
            Ok(game_type) => self.game_type = game_type,
            Err(err) => warn!(source, "ignoring game type: {err}"),
        }
    }

    fn set_strategy(&mut self, source: &str, raw: &str) {
        match raw.parse::<Strategy>() {
            Ok(strategy) => self.strategy = strategy,
            Err(err) => warn!(source, "ignoring strategy: {err}"),
        }
    }
}

/// Layers defaults, the optional settings file and the process environment.
/// The base URL is not validated here so a command-line override can still
/// replace a bad value; [`crate::HttpGateway::from_settings`] validates it.
///
/// With no explicit path, `akinator.toml` in the working directory is used
/// when present. An explicit path that cannot be read is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let raw = match config_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_SETTINGS_FILE).ok(),
    };

    let settings = settings_from_sources(raw.as_deref(), |name| std::env::var(name).ok())?;
    Ok(settings)
}

pub fn settings_from_sources(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();
    if let Some(raw) = file_contents {
        settings.apply_file(toml::from_str::<SettingsFile>(raw)?);
    }
    settings.apply_env(env);
    Ok(settings)
}

pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let invalid = |message: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };

    let mut url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".into()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
