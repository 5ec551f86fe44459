use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use zenjourney_core::WorkdayConfig;

use crate::state::ensure_zenjourney_home;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone the workday window is anchored in.
    pub timezone: String,
    pub workday: WorkdayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
            workday: WorkdayConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_zenjourney_home()?.join("config.toml"))
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
    save_config(&Config::default())?;
    println!("Wrote default config: {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            timezone: "Europe/Berlin".to_string(),
            workday: WorkdayConfig {
                start_time: "08:30".to_string(),
                end_time: "16:30".to_string(),
                break_minutes: 10,
            },
        };
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn default_config_has_a_valid_window() {
        let cfg = Config::default();
        let tz: chrono_tz::Tz = cfg.timezone.parse().unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert!(cfg.workday.resolve_window(date, tz).is_ok());
    }
}
