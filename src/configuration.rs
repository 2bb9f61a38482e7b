//! src/configuration.rs
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub monitor: MonitorSettings,
    #[serde(default)]
    pub pool: PoolSettings,
    pub log: LogSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct MonitorSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub poll_interval_ms: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_idle_polls: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub bar_width: usize,
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_idle_polls: 10,
            bar_width: 50,
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct PoolSettings {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub max_threads: Option<usize>,
}

impl PoolSettings {
    /// Configured thread count, or the number of available processors.
    pub fn max_threads(&self) -> usize {
        match self.max_threads {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct LogSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monitor: MonitorSettings::default(),
            pool: PoolSettings::default(),
            log: LogSettings {
                level: "warn".into(),
            },
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    get_configuration_from(&base_path.join("configuration"))
}

/// Defaults, then `<config_dir>/base.yaml` if present, then `WORDCOUNT_*`
/// environment variables.
pub fn get_configuration_from(config_dir: &Path) -> Result<Settings, config::ConfigError> {
    let defaults = Settings::default();
    let settings = config::Config::builder()
        .set_default(
            "monitor.poll_interval_ms",
            defaults.monitor.poll_interval_ms,
        )?
        .set_default(
            "monitor.max_idle_polls",
            u64::from(defaults.monitor.max_idle_polls),
        )?
        .set_default("monitor.bar_width", defaults.monitor.bar_width as u64)?
        .set_default("log.level", defaults.log.level)?
        .add_source(config::File::from(config_dir.join("base.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix("WORDCOUNT")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
