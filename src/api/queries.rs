use serde::{Deserialize, Serialize};

use crate::engine::{GamePhase, PairingEngine, RandomSource};
use crate::infra::mapping::{pairing_to_dto, session_to_view, summary_to_dto};
use crate::time_ctrl::TimerBackend;

use super::dto::{GameResultDto, GameViewDto, PairingDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Полное состояние текущей игры.
    GetGame,

    /// Пары, собранные на данный момент.
    GetPairings,

    /// Итоги (только если игра завершена).
    GetResult,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Game(Option<GameViewDto>),
    Pairings(Vec<PairingDto>),
    Result(Option<GameResultDto>),
}

/// Выполнить запрос. Событий не шлёт и состояние не меняет.
pub fn run_query<R, T>(engine: &PairingEngine<R, T>, query: Query) -> QueryResponse
where
    R: RandomSource,
    T: TimerBackend,
{
    match query {
        Query::GetGame => QueryResponse::Game(engine.session().map(session_to_view)),

        Query::GetPairings => QueryResponse::Pairings(
            engine
                .session()
                .map(|s| s.pairings().iter().map(pairing_to_dto).collect())
                .unwrap_or_default(),
        ),

        Query::GetResult => QueryResponse::Result(
            engine
                .session()
                .filter(|s| s.phase() == GamePhase::Ended)
                .and_then(|_| engine.summary())
                .map(|summary| summary_to_dto(&summary)),
        ),
    }
}
