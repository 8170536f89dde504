use anyhow::{Context, Result};
use cinder_activity::ShiftThresholds;
use cinder_core::{AlertThresholds, ForecastConfig, StatusThresholds, parse_timezone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_cinder_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub forecast: ForecastConfig,
    pub status: StatusThresholds,
    pub report: ReportSection,
    pub activity: ActivitySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// IANA zone used to render timestamps in reports.
    pub timezone: String,
    /// Where `cinder export` writes when `--out` is omitted.
    pub export_dir: Option<PathBuf>,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
            export_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySection {
    /// Trailing hours analyzed by `cinder activity`.
    pub window_hours: i64,
    pub alerts: AlertThresholds,
    /// Day-over-baseline limits for `cinder activity-daily`.
    pub shifts: ShiftThresholds,
}

impl Default for ActivitySection {
    fn default() -> Self {
        Self {
            window_hours: 6,
            alerts: AlertThresholds::default(),
            shifts: ShiftThresholds::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.forecast.validate().context("[forecast]")?;
        self.status.validate().context("[status]")?;
        parse_timezone(&self.report.timezone).context("[report]")?;
        if self.activity.window_hours <= 0 {
            anyhow::bail!("[activity] window_hours must be positive");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_cinder_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config = toml::from_str(&s).context("parse config.toml")?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
