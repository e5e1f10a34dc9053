use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{parse_names, RosterSide};
use crate::engine::{CatchOutcome, PairingEngine, RandomSource};
use crate::infra::mapping::{pairing_to_dto, summary_to_dto, turn_status_to_dto};
use crate::infra::persistence::{RosterStore, SavedRosters};
use crate::time_ctrl::{CatchTicket, TimerBackend};

use super::dto::{GameResultDto, PairingDto, TurnStatusDto};
use super::errors::ApiError;

/// Команда верхнего уровня (то, что шлёт фронт).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Начать игру по сырому вводу (одно имя на строку).
    StartGame(StartGameCommand),

    /// "GO FISH" за текущего рыбака.
    GoFish,

    /// Таймер поклёвки сработал.
    ///
    /// Шлёт не пользователь, а драйвер таймера.
    ResolveCatch(ResolveCatchCommand),

    /// Сбросить игру и вернуться к вводу имён.
    PlayAgain,
}

/// Команда старта игры.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartGameCommand {
    pub fishermen_text: String,
    pub fish_text: String,
}

/// Разрешить заброс по тикету.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolveCatchCommand {
    pub ticket: CatchTicket,
}

/// Результат команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResult {
    Started(TurnStatusDto),
    CastAccepted,
    Caught(PairingDto),
    GameEnded(GameResultDto),
    Reset,
}

/// Выполнить команду над движком.
///
/// На старте сырой ввод сохраняется в `store` ДО валидации (чтобы
/// пользователь не потерял набранное); ошибка хранилища игру не ломает.
pub fn execute_command<R, T, S>(
    engine: &mut PairingEngine<R, T>,
    store: &mut S,
    command: Command,
) -> Result<CommandResult, ApiError>
where
    R: RandomSource,
    T: TimerBackend,
    S: RosterStore,
{
    match command {
        Command::StartGame(cmd) => {
            let saved = SavedRosters::new(cmd.fishermen_text, cmd.fish_text);
            if let Err(err) = store.save(&saved) {
                warn!(error = %err, "failed to save rosters");
            }

            let fishermen = parse_names(saved.raw(RosterSide::Fishermen));
            let fish = parse_names(saved.raw(RosterSide::Fish));
            engine.start(fishermen, fish)?;

            let status = engine.current_turn()?;
            Ok(CommandResult::Started(turn_status_to_dto(&status)))
        }

        Command::GoFish => {
            engine.request_catch()?;
            Ok(CommandResult::CastAccepted)
        }

        Command::ResolveCatch(cmd) => match engine.resolve_catch(cmd.ticket)? {
            CatchOutcome::Caught(record) => Ok(CommandResult::Caught(pairing_to_dto(&record))),
            CatchOutcome::Ended(summary) => Ok(CommandResult::GameEnded(summary_to_dto(&summary))),
        },

        Command::PlayAgain => {
            engine.play_again();
            Ok(CommandResult::Reset)
        }
    }
}
