use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_mentor_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub telegram: TelegramSection,
    pub summary: SummarySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSection {
    /// Bot token; the MENTOR_TELEGRAM_TOKEN env var takes precedence.
    pub token: String,
    /// Long-poll timeout in seconds.
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySection {
    /// Broadcast weekday, e.g. "sun" or "sunday".
    pub weekday: String,
    /// Hour of day, 0-23, in `timezone`.
    pub hour: u32,
    /// IANA timezone name, e.g. "Asia/Kolkata".
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramSection {
                token: String::new(),
                poll_timeout_secs: 50,
            },
            summary: SummarySection {
                weekday: "sun".to_string(),
                hour: 14,
                timezone: "UTC".to_string(),
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_mentor_home()?.join("config.toml"))
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

/// Resolve the bot token: environment first, then the config file.
pub fn telegram_token(cfg: &Config) -> Result<String> {
    if let Ok(token) = std::env::var("MENTOR_TELEGRAM_TOKEN") {
        if !token.is_empty() {
            return Ok(token);
        }
    }
    if cfg.telegram.token.is_empty() {
        bail!("no bot token: set MENTOR_TELEGRAM_TOKEN or telegram.token in config.toml");
    }
    Ok(cfg.telegram.token.clone())
}
