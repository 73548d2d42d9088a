use std::collections::HashMap;
use std::env;

use crate::core::models::PathStyle;
use crate::errors::{LineRefError, Result};

pub const PATH_TYPE: &str = "pathType";
pub const OLLAMA_ENDPOINT: &str = "ollamaEndpoint";
pub const OLLAMA_MODEL: &str = "ollamaModel";
pub const AI_SUMMARY_TIMEOUT: &str = "aiSummaryTimeout";
pub const AI_SUMMARY_ENABLED: &str = "aiSummaryEnabled";
pub const DEFAULT_SYSTEM_PROMPT: &str = "defaultSystemPrompt";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "deepseek-r1:8b";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Read-only key/value view of the host's settings.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// Settings taken from `LINEREF_*` environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfig;

impl EnvConfig {
    #[must_use]
    pub fn var_name(key: &str) -> Option<&'static str> {
        match key {
            PATH_TYPE => Some("LINEREF_PATH_TYPE"),
            OLLAMA_ENDPOINT => Some("LINEREF_OLLAMA_ENDPOINT"),
            OLLAMA_MODEL => Some("LINEREF_OLLAMA_MODEL"),
            AI_SUMMARY_TIMEOUT => Some("LINEREF_AI_SUMMARY_TIMEOUT"),
            AI_SUMMARY_ENABLED => Some("LINEREF_AI_SUMMARY_ENABLED"),
            DEFAULT_SYSTEM_PROMPT => Some("LINEREF_DEFAULT_SYSTEM_PROMPT"),
            _ => None,
        }
    }
}

impl ConfigStore for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        Self::var_name(key).and_then(|name| env::var(name).ok())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }
}

impl ConfigStore for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Values in `overrides` shadow those in `base`.
pub struct LayeredConfig<O, B> {
    overrides: O,
    base: B,
}

impl<O: ConfigStore, B: ConfigStore> LayeredConfig<O, B> {
    pub fn new(overrides: O, base: B) -> Self {
        Self { overrides, base }
    }
}

impl<O: ConfigStore, B: ConfigStore> ConfigStore for LayeredConfig<O, B> {
    fn get(&self, key: &str) -> Option<String> {
        self.overrides.get(key).or_else(|| self.base.get(key))
    }
}

/// Typed settings snapshot. Loaded fresh for every command so edits take effect
/// on the next invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub path_type: PathStyle,
    pub ollama_endpoint: String,
    pub ollama_model: String,
    pub ai_summary_timeout_ms: u64,
    pub ai_summary_enabled: bool,
    pub default_system_prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path_type: PathStyle::Relative,
            ollama_endpoint: DEFAULT_ENDPOINT.to_string(),
            ollama_model: DEFAULT_MODEL.to_string(),
            ai_summary_timeout_ms: DEFAULT_TIMEOUT_MS,
            ai_summary_enabled: true,
            default_system_prompt: String::new(),
        }
    }
}

impl Settings {
    /// # Errors
    ///
    /// Returns `InvalidConfig` when a present value cannot be parsed.
    pub fn load(store: &dyn ConfigStore) -> Result<Self> {
        let defaults = Self::default();

        let path_type = match store.get(PATH_TYPE) {
            Some(raw) => raw.parse::<PathStyle>().map_err(|()| invalid(PATH_TYPE, &raw))?,
            None => defaults.path_type,
        };

        let ai_summary_timeout_ms = match store.get(AI_SUMMARY_TIMEOUT) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| invalid(AI_SUMMARY_TIMEOUT, &raw))?,
            None => defaults.ai_summary_timeout_ms,
        };

        let ai_summary_enabled = match store.get(AI_SUMMARY_ENABLED) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| invalid(AI_SUMMARY_ENABLED, &raw))?,
            None => defaults.ai_summary_enabled,
        };

        Ok(Self {
            path_type,
            ollama_endpoint: store
                .get(OLLAMA_ENDPOINT)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.ollama_endpoint),
            ollama_model: store
                .get(OLLAMA_MODEL)
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.ollama_model),
            ai_summary_timeout_ms,
            ai_summary_enabled,
            default_system_prompt: store
                .get(DEFAULT_SYSTEM_PROMPT)
                .unwrap_or(defaults.default_system_prompt),
        })
    }
}

fn invalid(key: &str, value: &str) -> LineRefError {
    LineRefError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
