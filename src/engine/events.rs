use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{GameId, GameSummary, Name, PairingRecord, TurnIndex};

/// Тип события в игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum GameEventKind {
    /// Новая игра началась.
    GameStarted {
        game_id: GameId,
        fishermen: usize,
        fish: usize,
    },

    /// Ход перешёл к рыбаку.
    TurnStarted {
        turn: TurnIndex,
        fisherman: Name,
        remaining_fish: usize,
    },

    /// Удочка заброшена, ждём поклёвку. Задержка здесь намеренно не раскрывается.
    CastStarted {
        turn: TurnIndex,
        fisherman: Name,
    },

    /// Рыба поймана.
    CatchResolved(PairingRecord),

    /// Игра завершена, итоговый список пар.
    GameEnded(GameSummary),

    /// Игру бросили (play again / новый старт посреди игры).
    GameAbandoned {
        game_id: GameId,
    },
}

/// Событие в игре с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameEvent {
    pub index: u32,
    pub kind: GameEventKind,
}

/// Полная история одной игры.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GameHistory {
    pub events: Vec<GameEvent>,
}

impl GameHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: GameEventKind) -> &GameEvent {
        let idx = self.events.len() as u32;
        self.events.push(GameEvent { index: idx, kind });
        &self.events[idx as usize]
    }
}

/// Подписчик на события движка (UI, анимация, звук, dev-CLI).
///
/// Вызывается синхронно изнутри операций движка. Менять состояние движка
/// подписчик может только через его публичные операции, и не из колбэка.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Пробросить события в канал (например, в async-цикл презентации).
#[derive(Clone, Debug)]
pub struct ChannelObserver(pub UnboundedSender<GameEvent>);

impl GameObserver for ChannelObserver {
    fn on_event(&mut self, event: &GameEvent) {
        // Закрытый канал — не ошибка движка, просто никто больше не слушает.
        let _ = self.0.send(event.clone());
    }
}
