// src/time_ctrl/scheduler.rs
//! Планировщик поклёвки для текущего хода.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use crate::engine::RandomSource;

use super::{CastRules, CatchTicket, RulesError, TimerBackend};

/// Ожидающий улов: тикет + вытянутая задержка (наружу не отдаётся).
#[derive(Clone, Copy)]
struct PendingCatch {
    ticket: CatchTicket,
    delay_ms: u64,
}

/// Состояние таймера текущего хода.
///
/// Инвариант: одновременно ждёт не больше одного тикета,
/// и `complete` принимает каждый тикет не больше одного раза.
pub struct TurnScheduler<T: TimerBackend> {
    rules: CastRules,
    timer: T,
    pending: Option<PendingCatch>,
    next_ticket: u64,
}

impl<T: TimerBackend> TurnScheduler<T> {
    pub fn new(rules: CastRules, timer: T) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self {
            rules,
            timer,
            pending: None,
            next_ticket: 1,
        })
    }

    pub fn rules(&self) -> &CastRules {
        &self.rules
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Тикет, который сейчас ждёт срабатывания.
    pub fn pending(&self) -> Option<CatchTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Вытянуть задержку из `[min_delay_ms, max_delay_ms]` и взвести таймер.
    ///
    /// Возвращает только тикет: сама задержка остаётся внутри.
    pub fn schedule<R: RandomSource>(&mut self, rng: &mut R) -> CatchTicket {
        // Повторный schedule без complete/cancel — старый тикет снимаем,
        // чтобы не было двух ожидающих.
        if let Some(stale) = self.cancel() {
            debug!(ticket = %stale, "replacing pending catch");
        }

        let delay_ms = rng.uniform_int(self.rules.min_delay_ms, self.rules.max_delay_ms);
        let ticket = CatchTicket::from_raw(self.next_ticket);
        self.next_ticket += 1;

        self.timer.arm(ticket, Duration::from_millis(delay_ms));
        self.pending = Some(PendingCatch { ticket, delay_ms });
        trace!(ticket = %ticket, "catch scheduled");
        ticket
    }

    /// Отметить, что таймер `ticket` сработал.
    ///
    /// `true` — это ожидаемый тикет, и он принят впервые; любой другой
    /// (отменённый, чужой, повторный) -> `false`.
    pub fn complete(&mut self, ticket: CatchTicket) -> bool {
        match self.pending {
            Some(p) if p.ticket == ticket => {
                self.pending = None;
                trace!(ticket = %ticket, delay_ms = p.delay_ms, "catch delay elapsed");
                true
            }
            _ => false,
        }
    }

    /// Снять ожидающий таймер (новая игра / play again / выход).
    ///
    /// Флаг заброса в движке НЕ трогает — это забота вызывающего.
    pub fn cancel(&mut self) -> Option<CatchTicket> {
        let pending = self.pending.take()?;
        self.timer.disarm(pending.ticket);
        debug!(ticket = %pending.ticket, "pending catch cancelled");
        Some(pending.ticket)
    }
}

// Задержку и таймер не печатаем: по ним видно, когда клюнет.
impl<T: TimerBackend> fmt::Debug for TurnScheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnScheduler")
            .field("rules", &self.rules)
            .field("pending", &self.pending())
            .field("next_ticket", &self.next_ticket)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::DeterministicRng;
    use crate::time_ctrl::ManualTimer;

    fn scheduler(rules: CastRules) -> (TurnScheduler<ManualTimer>, ManualTimer) {
        let timer = ManualTimer::new();
        (TurnScheduler::new(rules, timer.clone()).unwrap(), timer)
    }

    #[test]
    fn delay_stays_within_rules() {
        let (mut sched, timer) = scheduler(CastRules::new(1_500, 10_000, 0));
        let mut rng = DeterministicRng::from_u64(42);

        for _ in 0..200 {
            let ticket = sched.schedule(&mut rng);
            assert!(timer.advance(Duration::from_millis(1_499)).is_empty());
            let fired = timer.advance(Duration::from_millis(10_000 - 1_499));
            assert_eq!(fired, vec![ticket]);
            assert!(sched.complete(ticket));
        }
    }

    #[test]
    fn ticket_completes_exactly_once() {
        let (mut sched, _timer) = scheduler(CastRules::quick());
        let mut rng = DeterministicRng::from_u64(1);

        let ticket = sched.schedule(&mut rng);
        assert!(sched.complete(ticket));
        assert!(!sched.complete(ticket));
    }

    #[test]
    fn cancel_disarms_timer() {
        let (mut sched, timer) = scheduler(CastRules::quick());
        let mut rng = DeterministicRng::from_u64(2);

        let ticket = sched.schedule(&mut rng);
        assert!(timer.is_armed(ticket));
        assert_eq!(sched.cancel(), Some(ticket));
        assert!(!timer.is_armed(ticket));
        assert!(!sched.complete(ticket));
        assert_eq!(sched.cancel(), None);
    }

    #[test]
    fn debug_output_hides_pending_delay() {
        let (mut sched, timer) = scheduler(CastRules::standard());
        let mut rng = DeterministicRng::from_u64(5);
        let delay_ms = DeterministicRng::from_u64(5).uniform_int(1_500, 10_000);

        let ticket = sched.schedule(&mut rng);
        let sched_dbg = format!("{sched:?}");
        let timer_dbg = format!("{timer:?}");

        assert!(sched_dbg.contains(&format!("{ticket:?}")));
        for dbg in [&sched_dbg, &timer_dbg] {
            assert!(!dbg.contains("PendingCatch"), "{dbg}");
            assert!(!dbg.contains(&delay_ms.to_string()), "{dbg}");
        }
    }

    #[test]
    fn invalid_rules_rejected() {
        let err = TurnScheduler::new(CastRules::new(10, 5, 0), ManualTimer::new()).unwrap_err();
        assert_eq!(err, RulesError::EmptyRange { min_ms: 10, max_ms: 5 });
    }
}
