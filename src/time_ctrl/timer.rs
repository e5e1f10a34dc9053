// src/time_ctrl/timer.rs
//! Бэкенды таймера: кто именно "ждёт" поклёвку.
//!
//! Таймер ничего не знает о движке: по истечении он только отдаёт тикет
//! наружу, а дальше драйвер вызывает `PairingEngine::resolve_catch(ticket)`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::CatchTicket;

/// Одноразовый таймер с отменой.
pub trait TimerBackend {
    /// Взвести таймер: через `delay` тикет должен "сработать".
    fn arm(&mut self, ticket: CatchTicket, delay: Duration);

    /// Снять таймер. После этого тикет уже не сработает (или будет отброшен движком).
    fn disarm(&mut self, ticket: CatchTicket);
}

/// Реальный таймер на tokio: одна задача `sleep` на тикет,
/// сработавшие тикеты приходят в канал.
#[derive(Debug)]
pub struct TokioTimer {
    runtime: Handle,
    fired_tx: UnboundedSender<CatchTicket>,
    tasks: HashMap<CatchTicket, JoinHandle<()>>,
}

impl TokioTimer {
    /// Создать таймер поверх рантайма и получить приёмник сработавших тикетов.
    pub fn new(runtime: Handle) -> (Self, UnboundedReceiver<CatchTicket>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let timer = Self {
            runtime,
            fired_tx,
            tasks: HashMap::new(),
        };
        (timer, fired_rx)
    }

    /// Сколько таймеров сейчас реально ждут.
    pub fn armed_count(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl TimerBackend for TokioTimer {
    fn arm(&mut self, ticket: CatchTicket, delay: Duration) {
        // Чистим уже отработавшие задачи, чтобы map не рос.
        self.tasks.retain(|_, h| !h.is_finished());

        let tx = self.fired_tx.clone();
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(ticket);
        });
        self.tasks.insert(ticket, handle);
    }

    fn disarm(&mut self, ticket: CatchTicket) {
        if let Some(handle) = self.tasks.remove(&ticket) {
            handle.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[derive(Debug, Default)]
struct ManualClock {
    now: Duration,
    armed: BTreeMap<CatchTicket, Duration>,
}

/// Таймер с виртуальным временем для тестов.
///
/// Клоны делят одно состояние: тест держит у себя копию и двигает время,
/// пока другая копия живёт внутри движка.
#[derive(Clone, Default)]
pub struct ManualTimer {
    inner: Rc<RefCell<ManualClock>>,
}

// Только тикеты: по дедлайнам можно вычислить задержку.
impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.inner.borrow();
        f.debug_struct("ManualTimer")
            .field("armed", &clock.armed.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сдвинуть виртуальное время и забрать тикеты, чей срок наступил
    /// (в порядке срабатывания).
    pub fn advance(&self, by: Duration) -> Vec<CatchTicket> {
        let mut clock = self.inner.borrow_mut();
        clock.now += by;
        let now = clock.now;

        let mut due: Vec<(Duration, CatchTicket)> = clock
            .armed
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(ticket, deadline)| (*deadline, *ticket))
            .collect();
        due.sort();

        for (_, ticket) in &due {
            clock.armed.remove(ticket);
        }
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }

    /// Прокрутить время до срабатывания всех взведённых таймеров.
    pub fn fire_all(&self) -> Vec<CatchTicket> {
        let latest = {
            let clock = self.inner.borrow();
            clock
                .armed
                .values()
                .max()
                .map(|deadline| deadline.saturating_sub(clock.now))
        };
        match latest {
            Some(by) => self.advance(by),
            None => Vec::new(),
        }
    }

    pub fn armed_count(&self) -> usize {
        self.inner.borrow().armed.len()
    }

    pub fn is_armed(&self, ticket: CatchTicket) -> bool {
        self.inner.borrow().armed.contains_key(&ticket)
    }
}

impl TimerBackend for ManualTimer {
    fn arm(&mut self, ticket: CatchTicket, delay: Duration) {
        let mut clock = self.inner.borrow_mut();
        let deadline = clock.now + delay;
        clock.armed.insert(ticket, deadline);
    }

    fn disarm(&mut self, ticket: CatchTicket) {
        self.inner.borrow_mut().armed.remove(&ticket);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timer_fires_in_deadline_order() {
        let mut timer = ManualTimer::new();
        timer.arm(CatchTicket::from_raw(1), Duration::from_millis(300));
        timer.arm(CatchTicket::from_raw(2), Duration::from_millis(100));

        assert!(timer.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(timer.advance(Duration::from_millis(1)), vec![CatchTicket::from_raw(2)]);
        assert_eq!(timer.fire_all(), vec![CatchTicket::from_raw(1)]);
        assert_eq!(timer.armed_count(), 0);
    }

    #[test]
    fn disarmed_ticket_never_fires() {
        let mut timer = ManualTimer::new();
        let ticket = CatchTicket::from_raw(7);
        timer.arm(ticket, Duration::from_millis(50));
        timer.disarm(ticket);
        assert!(timer.advance(Duration::from_secs(10)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_delivers_only_armed_tickets() {
        let (mut timer, mut fired) = TokioTimer::new(Handle::current());
        let keep = CatchTicket::from_raw(1);
        let dropped = CatchTicket::from_raw(2);

        timer.arm(keep, Duration::from_millis(1_500));
        timer.arm(dropped, Duration::from_millis(500));
        timer.disarm(dropped);

        assert_eq!(fired.recv().await, Some(keep));
        let nothing = tokio::time::timeout(Duration::from_secs(60), fired.recv()).await;
        assert!(nothing.is_err(), "cancelled ticket must not fire");
    }
}
