use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, пустой список имён).
    BadRequest(String),

    /// Команда не может быть выполнена в текущем состоянии
    /// (уже забрасываем, игра окончена, тикет протух...).
    InvalidCommand(String),

    /// Внутренняя ошибка (нарушен инвариант движка).
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmptyRoster { .. } => ApiError::BadRequest(err.to_string()),
            EngineError::AlreadyCasting
            | EngineError::NoActiveGame
            | EngineError::GameOver
            | EngineError::NotCasting
            | EngineError::StaleCatch(_) => ApiError::InvalidCommand(err.to_string()),
            EngineError::EmptyPool | EngineError::InvalidRules(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
