use serde::{Deserialize, Serialize};

use crate::domain::{GameId, TurnIndex};
use crate::engine::GamePhase;

/// DTO одной пары.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairingDto {
    pub turn: TurnIndex,
    pub fisherman: String,
    pub fish: String,
}

/// DTO текущего хода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnInfoDto {
    pub turn: TurnIndex,
    pub fisherman: String,
    /// Сколько рыб рисовать в воде.
    pub remaining_fish: usize,
}

/// DTO итогов игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResultDto {
    pub game_id: GameId,
    pub pairings: Vec<PairingDto>,
    pub unpaired_fishermen: Vec<String>,
    pub leftover_fish: Vec<String>,
}

/// DTO состояния игры целиком.
///
/// Порядок ходов наружу не отдаём — только текущего рыбака.
/// Задержку поклёвки тоже: её не знает никто, кроме таймера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameViewDto {
    pub game_id: GameId,
    pub phase: GamePhase,
    pub current_fisherman: Option<String>,
    pub turn: TurnIndex,
    pub total_turns: usize,
    pub remaining_fish: usize,
    /// Идёт ли сейчас заброс.
    pub casting: bool,
    pub pairings: Vec<PairingDto>,
}

/// Статус хода для фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnStatusDto {
    Turn(TurnInfoDto),
    Ended(GameResultDto),
}
