use thiserror::Error;

use crate::domain::RosterSide;
use crate::time_ctrl::{CatchTicket, RulesError};

/// Ошибки движка рыбалки.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Ошибка валидации на старте: одна из сторон пустая.
    /// Сессия при этом не создаётся и не меняется.
    #[error("empty roster: no {side} entered")]
    EmptyRoster { side: RosterSide },

    /// Повторный "GO FISH" до того, как предыдущий заброс разрешился.
    #[error("already casting, wait for the catch")]
    AlreadyCasting,

    /// Пул рыб пуст. Движок проверяет это сам, так что сюда попадать не должны.
    #[error("fish pool is empty")]
    EmptyPool,

    #[error("no active game")]
    NoActiveGame,

    #[error("game is over")]
    GameOver,

    #[error("nothing is being cast right now")]
    NotCasting,

    /// Сработал чужой/отменённый/повторный тикет.
    #[error("stale catch ticket {0}")]
    StaleCatch(CatchTicket),

    #[error("invalid cast rules: {0}")]
    InvalidRules(#[from] RulesError),
}
