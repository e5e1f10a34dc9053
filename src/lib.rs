//! Go Fish for a Team Mate: движок случайных пар "рыбак + рыба".
//!
//! Рыбаки ходят по одному в случайном порядке, каждый забрасывает удочку,
//! через непредсказуемую паузу вытаскивает случайную рыбу из пула.
//! Игра кончается, когда закончились рыбаки или рыбы.
//!
//! Слои:
//! - `domain` — имена, ростеры, пары;
//! - `engine` — `PairingEngine` и события;
//! - `time_ctrl` — задержка поклёвки и таймеры;
//! - `infra` — RNG, хранилище ввода, маппинги;
//! - `api` — команды/запросы/DTO для презентации.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod time_ctrl;

pub use domain::{GameSummary, Name, PairingRecord};
pub use engine::{CatchOutcome, EngineError, PairingEngine, RandomSource, TurnStatus};
pub use time_ctrl::{CastRules, ManualTimer, TokioTimer};
