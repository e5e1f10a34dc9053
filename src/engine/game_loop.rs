use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{GameSummary, Name, PairingRecord, Roster, RosterSide, TurnIndex};
use crate::engine::errors::EngineError;
use crate::engine::events::{GameEventKind, GameObserver};
use crate::engine::session::{GamePhase, GameSession};
use crate::engine::RandomSource;
use crate::infra::IdGenerator;
use crate::time_ctrl::{CastRules, CatchTicket, TimerBackend, TurnScheduler};

/// Чей сейчас ход.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnInfo {
    pub turn: TurnIndex,
    pub fisherman: Name,
    pub remaining_fish: usize,
}

/// Статус игры для внешнего кода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnStatus {
    Turn(TurnInfo),
    Ended(GameSummary),
}

/// Результат разрешения заброса.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatchOutcome {
    /// Поймали, игра продолжается.
    Caught(PairingRecord),
    /// Этот улов был последним (или ловить было уже нечего).
    Ended(GameSummary),
}

/// Движок пар: владеет сессией, RNG и планировщиком поклёвки.
///
/// Всё однопоточно: каждая операция выполняется до конца, единственная
/// "пауза" — таймер заброса, который возвращает тикет драйверу, а драйвер
/// отдаёт его в `resolve_catch`.
pub struct PairingEngine<R: RandomSource, T: TimerBackend> {
    rng: R,
    scheduler: TurnScheduler<T>,
    ids: IdGenerator,
    session: Option<GameSession>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl<R: RandomSource, T: TimerBackend> PairingEngine<R, T> {
    pub fn new(rng: R, rules: CastRules, timer: T) -> Result<Self, EngineError> {
        Ok(Self {
            rng,
            scheduler: TurnScheduler::new(rules, timer)?,
            ids: IdGenerator::new(),
            session: None,
            observers: Vec::new(),
        })
    }

    /// Подписать презентацию на события.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn rules(&self) -> &CastRules {
        self.scheduler.rules()
    }

    pub fn timer(&self) -> &T {
        self.scheduler.timer()
    }

    /// Тикет текущего заброса, если он ждёт таймера.
    pub fn pending_ticket(&self) -> Option<CatchTicket> {
        self.scheduler.pending()
    }

    pub fn is_casting(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.casting)
    }

    pub fn summary(&self) -> Option<GameSummary> {
        self.session.as_ref().map(GameSession::summary)
    }

    /// Старт новой игры:
    /// - валидирует оба ростера (пустой -> `EmptyRoster`, ничего не трогаем);
    /// - отменяет висящий таймер прошлой игры и выбрасывает её сессию;
    /// - тасует рыбаков, копирует пул рыб;
    /// - сразу объявляет первый ход.
    pub fn start(&mut self, fishermen: Roster, fish: Roster) -> Result<&GameSession, EngineError> {
        if fishermen.is_empty() {
            return Err(EngineError::EmptyRoster {
                side: RosterSide::Fishermen,
            });
        }
        if fish.is_empty() {
            return Err(EngineError::EmptyRoster {
                side: RosterSide::Fish,
            });
        }

        self.abandon_current();

        let game_id = self.ids.next_game_id();
        let fishermen_count = fishermen.len();
        let fish_count = fish.len();
        let turn_order = self.rng.shuffled(&fishermen);
        info!(
            game_id,
            fishermen = fishermen_count,
            fish = fish_count,
            "game started"
        );

        self.session = Some(GameSession::new(game_id, turn_order, fish));
        self.emit(GameEventKind::GameStarted {
            game_id,
            fishermen: fishermen_count,
            fish: fish_count,
        });

        self.current_turn()?;
        self.session.as_ref().ok_or(EngineError::NoActiveGame)
    }

    /// Текущий ход.
    ///
    /// Если кончились рыбаки или рыбы — игра переходит в Ended (один раз),
    /// лишние имена на более длинной стороне так и остаются без пары.
    /// Повторные вызовы без продвижения хода возвращают то же самое и
    /// не шлют событий повторно.
    pub fn current_turn(&mut self) -> Result<TurnStatus, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoActiveGame)?;

        if session.phase == GamePhase::Ended {
            return Ok(TurnStatus::Ended(session.summary()));
        }

        if session.is_exhausted() {
            session.phase = GamePhase::Ended;
            session.casting = false;
            let summary = session.summary();
            info!(
                game_id = summary.game_id,
                pairings = summary.len(),
                unpaired_fishermen = summary.unpaired_fishermen.len(),
                leftover_fish = summary.leftover_fish.len(),
                "game ended"
            );
            self.emit(GameEventKind::GameEnded(summary.clone()));
            return Ok(TurnStatus::Ended(summary));
        }

        let fisherman = session
            .current_fisherman()
            .cloned()
            .ok_or(EngineError::GameOver)?;
        let info = TurnInfo {
            turn: session.turn_index,
            fisherman,
            remaining_fish: session.pool.len(),
        };

        let first_time = session.announced_turn != Some(info.turn);
        if first_time {
            session.announced_turn = Some(info.turn);
            debug!(turn = info.turn, fisherman = %info.fisherman, "turn started");
            self.emit(GameEventKind::TurnStarted {
                turn: info.turn,
                fisherman: info.fisherman.clone(),
                remaining_fish: info.remaining_fish,
            });
        }

        Ok(TurnStatus::Turn(info))
    }

    /// "GO FISH": забросить удочку за текущего рыбака.
    ///
    /// Не блокирует: только ставит флаг и взводит таймер.
    /// Повторный вызов до улова -> `AlreadyCasting`, состояние не меняется.
    pub fn request_catch(&mut self) -> Result<(), EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoActiveGame)?;

        if session.phase == GamePhase::Ended {
            return Err(EngineError::GameOver);
        }
        if session.casting {
            debug!("cast rejected: already casting");
            return Err(EngineError::AlreadyCasting);
        }

        let turn = session.turn_index;
        let fisherman = session
            .current_fisherman()
            .cloned()
            .ok_or(EngineError::GameOver)?;

        session.casting = true;
        let ticket = self.scheduler.schedule(&mut self.rng);
        debug!(turn, fisherman = %fisherman, ticket = %ticket, "line cast");

        self.emit(GameEventKind::CastStarted { turn, fisherman });
        Ok(())
    }

    /// Таймер `ticket` сработал — фиксируем улов.
    ///
    /// Чужие, отменённые и повторные тикеты отбрасываются (`StaleCatch`)
    /// и сессию не трогают.
    pub fn resolve_catch(&mut self, ticket: CatchTicket) -> Result<CatchOutcome, EngineError> {
        if !self.scheduler.complete(ticket) {
            warn!(ticket = %ticket, "stale catch ignored");
            return Err(EngineError::StaleCatch(ticket));
        }

        let session = self.session.as_mut().ok_or(EngineError::NoActiveGame)?;
        if !session.casting {
            return Err(EngineError::NotCasting);
        }

        if session.pool.is_empty() {
            session.casting = false;
            return match self.current_turn()? {
                TurnStatus::Ended(summary) => Ok(CatchOutcome::Ended(summary)),
                TurnStatus::Turn(_) => Err(EngineError::EmptyPool),
            };
        }

        let fisherman = session
            .current_fisherman()
            .cloned()
            .ok_or(EngineError::GameOver)?;
        let fish = self.rng.pick_and_remove(&mut session.pool)?;

        let record = PairingRecord {
            turn: session.turn_index,
            fisherman,
            fish,
        };
        session.pairings.push(record.clone());
        session.casting = false;
        session.turn_index += 1;

        info!(
            game_id = session.game_id,
            turn = record.turn,
            fisherman = %record.fisherman,
            fish = %record.fish,
            "catch resolved"
        );
        self.emit(GameEventKind::CatchResolved(record.clone()));

        match self.current_turn()? {
            TurnStatus::Ended(summary) => Ok(CatchOutcome::Ended(summary)),
            TurnStatus::Turn(_) => Ok(CatchOutcome::Caught(record)),
        }
    }

    /// Сыграть ещё раз: сбросить игру и вернуться к вводу имён.
    pub fn play_again(&mut self) {
        self.abandon_current();
        self.session = None;
    }

    /// Сначала снимаем таймер, потом трогаем сессию: иначе старый таймер
    /// мог бы сработать уже по новой игре.
    fn abandon_current(&mut self) {
        if let Some(ticket) = self.scheduler.cancel() {
            debug!(ticket = %ticket, "outstanding catch cancelled on reset");
        }

        let abandoned = match self.session.as_mut() {
            Some(session) => {
                session.casting = false;
                (session.phase == GamePhase::InProgress).then_some(session.game_id)
            }
            None => None,
        };

        if let Some(game_id) = abandoned {
            info!(game_id, "game abandoned");
            self.emit(GameEventKind::GameAbandoned { game_id });
        }
    }

    fn emit(&mut self, kind: GameEventKind) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let event = session.history.push(kind);
        for observer in self.observers.iter_mut() {
            observer.on_event(event);
        }
    }
}
