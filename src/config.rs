use crate::error::{DialogError, DialogResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when the recognizer gives up waiting for speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Report the timeout and leave the microphone closed
    Stall,
    /// Report the timeout and reopen the microphone
    Reactivate,
    /// Report the timeout and end the conversation
    End,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Menu
    pub toppings: Vec<String>,

    // Dialog
    pub greeting: Option<String>,
    pub closing_prompt: String,
    pub undo_word: String,
    pub timeout_policy: TimeoutPolicy,
    pub classify_partials: bool,

    // Speech
    pub tts_engine: String,
    pub listen_timeout_secs: u64,

    // NLU
    pub model_dir: String,
    pub model_cache_dir: String,
    pub fuzzy_threshold: f64,

    // Meta
    pub log_level: String,
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toppings: [
                "white sauce",
                "tomato sauce",
                "fresh mozzarella",
                "dried tomatoes",
                "pepperoni",
                "mushrooms",
                "onions",
                "green peppers",
                "anchovies",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            greeting: Some("What would you like on your pizza?".to_string()),
            closing_prompt: "Will do! It'll be there in twenty minutes or your money back!"
                .to_string(),
            undo_word: "no".to_string(),
            timeout_policy: TimeoutPolicy::Stall,
            classify_partials: true,
            tts_engine: "console".to_string(),
            listen_timeout_secs: 10,
            model_dir: dirs::data_dir()
                .unwrap_or_default()
                .join("pizzatalk/models")
                .to_string_lossy()
                .to_string(),
            model_cache_dir: dirs::cache_dir()
                .unwrap_or_default()
                .join("pizzatalk")
                .to_string_lossy()
                .to_string(),
            fuzzy_threshold: 0.8,
            log_level: "INFO".to_string(),
            queue_capacity: 64,
        }
    }
}

impl Config {
    /// Load config from the default path, or fall back to defaults
    pub fn load() -> DialogResult<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> DialogResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Config>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                // Graceful degradation: log warning and use defaults
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> DialogResult<()> {
        self.save_to(&config_path())
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> DialogResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the dialog cannot run with
    pub fn validate(&self) -> DialogResult<()> {
        if self.toppings.iter().all(|t| t.trim().is_empty()) {
            return Err(DialogError::Config("topping catalog is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(DialogError::Config(format!(
                "fuzzy_threshold must be within 0..=1, got {}",
                self.fuzzy_threshold
            )));
        }
        if self.queue_capacity == 0 {
            return Err(DialogError::Config(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pizzatalk")
        .join("config.json")
}
