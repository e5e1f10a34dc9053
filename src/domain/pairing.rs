use serde::{Deserialize, Serialize};

use super::{GameId, Name, TurnIndex};

/// Результат одного разрешённого хода: рыбак + пойманная рыба.
///
/// Создаётся ровно один раз на ход и дальше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PairingRecord {
    /// Номер хода (0-based) в порядке TurnOrder.
    pub turn: TurnIndex,
    pub fisherman: Name,
    pub fish: Name,
}

/// Итог игры.
///
/// `pairings` — авторитетный полный список пар.
/// Остатки на более длинной стороне не ошибка: их просто некому/некого ловить.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub game_id: GameId,
    pub pairings: Vec<PairingRecord>,
    /// Рыбаки, до которых так и не дошёл ход.
    pub unpaired_fishermen: Vec<Name>,
    /// Рыбы, оставшиеся в пуле.
    pub leftover_fish: Vec<Name>,
}

impl GameSummary {
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}
