//! Configuration management.
//!
//! Questify reads a small TOML file (`config.toml` by default) with two
//! sections:
//!
//! ```toml
//! [game]
//! data_dir = "data"
//! enemies = ["Slime", "Goblin", "Bat"]
//!
//! [logging]
//! level = "info"
//! # file = "questify.log"
//! ```
//!
//! Every field has a sensible default; a missing file is not an error for
//! commands that can run without one (`init` writes the starter file).
//! Values are validated on load so the rest of the program can trust them.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default enemy roster.
pub const DEFAULT_ENEMIES: [&str; 3] = ["Slime", "Goblin", "Bat"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Directory holding the save slot.
    pub data_dir: String,
    /// Enemy names for the roster; labels only, no behavior attached.
    pub enemies: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            data_dir: "data".to_string(),
            enemies: DEFAULT_ENEMIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// error | warn | info | debug | trace
    pub level: String,
    /// Optional log file; console logging is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    ///
    /// The two failure modes are deliberately different: a missing file is
    /// normal (every field has a default and `init` writes the starter file),
    /// but a file that exists and fails to parse or validate is an error the
    /// user needs to see, not a silent fallback.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Write a starter `config.toml` with defaults. Refuses to overwrite.
    pub fn create_default(path: &str) -> Result<()> {
        if Path::new(path).exists() {
            return Err(anyhow!("config file already exists: {}", path));
        }
        let config = Config::default();
        let content =
            toml::to_string_pretty(&config).context("failed to serialize default config")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file: {}", path))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.game.data_dir.trim().is_empty() {
            return Err(anyhow!("game.data_dir must not be empty"));
        }
        if self.game.enemies.is_empty() {
            return Err(anyhow!("game.enemies must list at least one enemy"));
        }
        if self.game.enemies.iter().any(|e| e.trim().is_empty()) {
            return Err(anyhow!("game.enemies entries must not be blank"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("unknown logging.level: {}", other)),
        }
    }
}
