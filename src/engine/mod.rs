//! Движок "рыбалки": порядок ходов, пул рыб, заброс/улов, итоговые пары.
//!
//! Высокоуровневый объект: `PairingEngine`
//! Основные операции:
//!   - `start` – новая игра из двух ростеров
//!   - `current_turn` – чей сейчас ход (или конец игры)
//!   - `request_catch` – "GO FISH": забросить удочку
//!   - `resolve_catch` – таймер сработал, фиксируем улов
//!   - `play_again` – сбросить сессию

pub mod errors;
pub mod events;
pub mod game_loop;
pub mod session;

pub use errors::EngineError;
pub use events::{ChannelObserver, GameEvent, GameEventKind, GameHistory, GameObserver};
pub use game_loop::{CatchOutcome, PairingEngine, TurnInfo, TurnStatus};
pub use session::{GamePhase, GameSession};

/// RNG интерфейс для engine.
///
/// Обязательный метод один — `uniform_int`; тасовка и выбор из пула
/// выражены через него, поэтому seeded-реализация делает движок детерминированным.
pub trait RandomSource {
    /// Равномерное целое из `[min, max]` включительно. Требует `min <= max`.
    fn uniform_int(&mut self, min: u64, max: u64) -> u64;

    /// Fisher–Yates: от последнего индекса вниз до 1,
    /// каждый элемент меняем с равномерно выбранным индексом из `0..=i`.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.uniform_int(0, i as u64) as usize;
            slice.swap(i, j);
        }
    }

    /// Перемешанная копия; вход не трогаем.
    fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut copy = items.to_vec();
        self.shuffle(&mut copy);
        copy
    }

    /// Вынуть из пула элемент по равномерно случайному индексу.
    fn pick_and_remove<T>(&mut self, pool: &mut Vec<T>) -> Result<T, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }
        let idx = self.uniform_int(0, (pool.len() - 1) as u64) as usize;
        Ok(pool.remove(idx))
    }
}
