use serde::{Deserialize, Serialize};

use crate::domain::{GameId, GameSummary, Name, PairingRecord, Roster, TurnIndex};
use crate::engine::events::GameHistory;

/// Фаза сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    Ended,
}

/// Состояние одной игры.
///
/// Владеет им только `PairingEngine`; наружу отдаётся лишь `&GameSession`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) game_id: GameId,
    /// Перемешанный порядок рыбаков, фиксируется на старте.
    pub(crate) turn_order: Roster,
    /// Ещё не пойманные рыбы.
    pub(crate) pool: Roster,
    pub(crate) turn_index: TurnIndex,
    pub(crate) pairings: Vec<PairingRecord>,
    /// Идёт заброс (ждём таймер). Единственный "мьютекс" в системе.
    pub(crate) casting: bool,
    pub(crate) phase: GamePhase,
    /// Для какого хода уже отправили TurnStarted (чтобы current_turn был идемпотентным).
    pub(crate) announced_turn: Option<TurnIndex>,
    pub(crate) history: GameHistory,
}

impl GameSession {
    pub(crate) fn new(game_id: GameId, turn_order: Roster, pool: Roster) -> Self {
        Self {
            game_id,
            turn_order,
            pool,
            turn_index: 0,
            pairings: Vec::new(),
            casting: false,
            phase: GamePhase::InProgress,
            announced_turn: None,
            history: GameHistory::new(),
        }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn turn_order(&self) -> &[Name] {
        &self.turn_order
    }

    pub fn turn_index(&self) -> TurnIndex {
        self.turn_index
    }

    /// Сколько рыб ещё в пуле (для отрисовки спрайтов).
    pub fn remaining_fish(&self) -> usize {
        self.pool.len()
    }

    pub fn pairings(&self) -> &[PairingRecord] {
        &self.pairings
    }

    pub fn is_casting(&self) -> bool {
        self.casting
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Условие окончания: кончились рыбаки ИЛИ рыбы.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.turn_index >= self.turn_order.len() || self.pool.is_empty()
    }

    pub(crate) fn current_fisherman(&self) -> Option<&Name> {
        self.turn_order.get(self.turn_index)
    }

    pub(crate) fn summary(&self) -> GameSummary {
        let unpaired_fishermen = self
            .turn_order
            .get(self.turn_index..)
            .map(<[Name]>::to_vec)
            .unwrap_or_default();

        GameSummary {
            game_id: self.game_id,
            pairings: self.pairings.clone(),
            unpaired_fishermen,
            leftover_fish: self.pool.clone(),
        }
    }
}
