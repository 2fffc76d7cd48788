use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_TITLE_LENGTH: usize = 60;
pub const DEFAULT_SUFFIX: &str = "…";

/// Самое длинное чтение свойства, которое можно запросить одним GetProperty
/// (длина передаётся серверу в 32-битных словах).
pub const MAX_TITLE_LENGTH_LIMIT: usize = (u32::MAX - 3) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Напечатать заголовок один раз и выйти
    Single,
    /// Печатать заголовок при каждой смене окна или заголовка
    Follow,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub mode: Mode,
    pub max_title_length: usize,
    pub suffix: String,
    pub ignore_empty_title: bool,
    pub poll_interval_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
            suffix: DEFAULT_SUFFIX.to_string(),
            ignore_empty_title: false,
            poll_interval_ms: 250,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Загружает конфигурацию: значения по умолчанию, затем TOML-файл (если задан),
    /// затем переменные окружения `XWINDOW_*`.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed("XWINDOW_"))
            .extract()
            .with_context(|| match config_path {
                Some(path) => format!("Не удалось загрузить конфигурацию из {:?}", path),
                None => "Не удалось загрузить конфигурацию".to_string(),
            })?;

        Ok(config)
    }

    /// Длина суффикса в байтах, всегда согласована с самим суффиксом
    pub fn suffix_length(&self) -> usize {
        self.suffix.len()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn is_follow(&self) -> bool {
        self.mode == Mode::Follow
    }

    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.log_level),
        }

        if self.max_title_length > MAX_TITLE_LENGTH_LIMIT {
            anyhow::bail!(
                "max-title-length вне допустимого диапазона: {} (максимум {})",
                self.max_title_length,
                MAX_TITLE_LENGTH_LIMIT
            );
        }

        // Интервал опроса ограничен, чтобы запрос остановки замечался быстро
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 1000 {
            anyhow::bail!(
                "poll_interval_ms должно быть от 1 до 1000, получено {}",
                self.poll_interval_ms
            );
        }

        Ok(())
    }
}
