use anyhow::{Context, Result};
use moodchat_core::{SuggestionPools, TrendPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_moodchat_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub policy: TrendPolicy,
    pub classifier: ClassifierSection,
    /// Custom suggestion content; built-in pools when absent.
    pub suggestions: Option<SuggestionPools>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSection {
    /// "lexicon" (offline, default) or "remote".
    pub provider: String,
    /// Full model URL for provider = "remote".
    pub endpoint: String,
    /// Env var holding the API token for provider = "remote" (optional).
    pub api_token_env: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: TrendPolicy::default(),
            classifier: ClassifierSection {
                provider: "lexicon".to_string(),
                endpoint:
                    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english"
                        .to_string(),
                api_token_env: "MOODCHAT_API_TOKEN".to_string(),
            },
            suggestions: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_moodchat_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_toml_roundtrip() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.classifier.provider, "lexicon");
        assert_eq!(back.policy.window_days, 14);
        back.policy.validate().unwrap();
    }
}
