// src/time_ctrl/cast_rules.rs
//! Конфигурация тайминга заброса.
//!
//! Только "правила", без состояния и без привязки к конкретной игре.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки правил тайминга.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("min delay {min_ms}ms is greater than max delay {max_ms}ms")]
    EmptyRange { min_ms: u64, max_ms: u64 },

    #[error("max delay must be positive")]
    ZeroMaxDelay,

    #[error("cannot read rules file: {0}")]
    Io(String),

    #[error("cannot parse rules: {0}")]
    Parse(String),
}

/// Профиль тайминга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CastProfile {
    /// Как в оригинальной игре: поклёвка через 1.5–10 сек, улов показываем 3 сек.
    Standard,
    /// Для демо и ручной проверки: всё в разы быстрее.
    Quick,
}

/// Правила тайминга одной игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CastRules {
    /// Нижняя граница задержки поклёвки (включительно), мс.
    pub min_delay_ms: u64,
    /// Верхняя граница задержки поклёвки (включительно), мс.
    pub max_delay_ms: u64,
    /// Сколько презентация показывает результат улова перед следующим ходом, мс.
    /// Движок сам на это не ждёт.
    pub catch_display_ms: u64,
}

impl CastRules {
    /// Строгий конструктор.
    pub const fn new(min_delay_ms: u64, max_delay_ms: u64, catch_display_ms: u64) -> Self {
        Self {
            min_delay_ms,
            max_delay_ms,
            catch_display_ms,
        }
    }

    /// Стандартный профиль: 1500..=10000 мс, показ улова 3000 мс.
    pub const fn standard() -> Self {
        Self::new(1_500, 10_000, 3_000)
    }

    pub const fn quick() -> Self {
        Self::new(150, 1_000, 300)
    }

    pub const fn from_profile(profile: CastProfile) -> Self {
        match profile {
            CastProfile::Standard => Self::standard(),
            CastProfile::Quick => Self::quick(),
        }
    }

    pub fn validate(&self) -> Result<(), RulesError> {
        if self.max_delay_ms == 0 {
            return Err(RulesError::ZeroMaxDelay);
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(RulesError::EmptyRange {
                min_ms: self.min_delay_ms,
                max_ms: self.max_delay_ms,
            });
        }
        Ok(())
    }

    /// Разобрать правила из TOML. Отсутствующие поля берутся из `standard()`.
    pub fn from_toml_str(raw: &str) -> Result<Self, RulesError> {
        let rules: Self = toml::from_str(raw).map_err(|e| RulesError::Parse(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let raw = std::fs::read_to_string(path).map_err(|e| RulesError::Io(e.to_string()))?;
        Self::from_toml_str(&raw)
    }

    pub fn catch_display(&self) -> Duration {
        Duration::from_millis(self.catch_display_ms)
    }
}

impl Default for CastRules {
    fn default() -> Self {
        Self::standard()
    }
}
