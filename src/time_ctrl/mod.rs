// src/time_ctrl/mod.rs
//! Контроль времени заброса: непредсказуемая задержка перед уловом.
//!
//! Здесь собираем:
//! - правила (`CastRules`) — диапазон задержки и пауза показа улова;
//! - бэкенды таймера (`TokioTimer` для реального запуска, `ManualTimer` для тестов);
//! - `TurnScheduler`, который тянет задержку, взводит таймер и гарантирует
//!   ровно одно срабатывание на ход.

pub mod cast_rules;
pub mod scheduler;
pub mod timer;

pub use cast_rules::{CastProfile, CastRules, RulesError};
pub use scheduler::TurnScheduler;
pub use timer::{ManualTimer, TimerBackend, TokioTimer};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Идентификатор одного запланированного улова.
///
/// Ничего не знает о задержке: по тикету нельзя узнать, когда клюнет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatchTicket(u64);

impl CatchTicket {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CatchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
