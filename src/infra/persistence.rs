use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{parse_names, Roster, RosterSide};

/// Сырые тексты ростеров, как их ввёл пользователь (одно имя на строку).
///
/// Храним именно текст, а не распарсенные имена: при следующем запуске
/// пользователь видит свой ввод как был. История пар сюда НЕ попадает.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedRosters {
    pub fishermen: String,
    pub fish: String,
}

impl SavedRosters {
    pub fn new(fishermen: impl Into<String>, fish: impl Into<String>) -> Self {
        Self {
            fishermen: fishermen.into(),
            fish: fish.into(),
        }
    }

    pub fn raw(&self, side: RosterSide) -> &str {
        match side {
            RosterSide::Fishermen => &self.fishermen,
            RosterSide::Fish => &self.fish,
        }
    }

    pub fn parse(&self, side: RosterSide) -> Roster {
        parse_names(self.raw(side))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("roster store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("roster store is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// Абстракция хранилища введённых ростеров.
///
/// Движок о ней не знает: читает/пишет только слой презентации.
pub trait RosterStore {
    /// Загрузить последний ввод (None, если ещё ничего не сохраняли).
    fn load(&self) -> Result<Option<SavedRosters>, StoreError>;

    /// Сохранить ввод.
    fn save(&mut self, rosters: &SavedRosters) -> Result<(), StoreError>;
}

/// Простая in-memory реализация для тестов.
#[derive(Debug, Default)]
pub struct InMemoryRosterStore {
    saved: Option<SavedRosters>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for InMemoryRosterStore {
    fn load(&self) -> Result<Option<SavedRosters>, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, rosters: &SavedRosters) -> Result<(), StoreError> {
        self.saved = Some(rosters.clone());
        Ok(())
    }
}

/// Хранилище в JSON-файле (для локального запуска dev-CLI).
#[derive(Debug, Clone)]
pub struct JsonFileRosterStore {
    path: PathBuf,
}

impl JsonFileRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterStore for JsonFileRosterStore {
    fn load(&self) -> Result<Option<SavedRosters>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let saved = serde_json::from_str(&raw)?;
        debug!(path = %self.path.display(), "rosters loaded");
        Ok(Some(saved))
    }

    fn save(&mut self, rosters: &SavedRosters) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(rosters)?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "rosters saved");
        Ok(())
    }
}
