// Handles configuration loading, saving, and defaults.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Base URL of the project-management service, e.g. "https://acme.example.com".
    pub url: String,
    pub username: String,
    pub password: String,
    pub project_id: u64,
    /// Cap on elements emitted per collection when serializing; None = unlimited.
    #[serde(default)]
    pub limit_relations: Option<usize>,
}

impl Config {
    /// Load the configuration from disk.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(path: &Path) -> Result<Self> {
        // Explicitly detect missing file so callers can behave accordingly.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str).map_err(|e| {
            anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e)
        })?;
        Ok(())
    }
}
