use crate::api::dto::{GameResultDto, GameViewDto, PairingDto, TurnInfoDto, TurnStatusDto};
use crate::domain::{GameSummary, Name, PairingRecord};
use crate::engine::{GamePhase, GameSession, TurnInfo, TurnStatus};

fn names_to_strings(names: &[Name]) -> Vec<String> {
    names.iter().map(|n| n.as_str().to_string()).collect()
}

pub fn pairing_to_dto(record: &PairingRecord) -> PairingDto {
    PairingDto {
        turn: record.turn,
        fisherman: record.fisherman.as_str().to_string(),
        fish: record.fish.as_str().to_string(),
    }
}

pub fn summary_to_dto(summary: &GameSummary) -> GameResultDto {
    GameResultDto {
        game_id: summary.game_id,
        pairings: summary.pairings.iter().map(pairing_to_dto).collect(),
        unpaired_fishermen: names_to_strings(&summary.unpaired_fishermen),
        leftover_fish: names_to_strings(&summary.leftover_fish),
    }
}

pub fn turn_to_dto(info: &TurnInfo) -> TurnInfoDto {
    TurnInfoDto {
        turn: info.turn,
        fisherman: info.fisherman.as_str().to_string(),
        remaining_fish: info.remaining_fish,
    }
}

pub fn turn_status_to_dto(status: &TurnStatus) -> TurnStatusDto {
    match status {
        TurnStatus::Turn(info) => TurnStatusDto::Turn(turn_to_dto(info)),
        TurnStatus::Ended(summary) => TurnStatusDto::Ended(summary_to_dto(summary)),
    }
}

/// Утилита: маппинг GameSession -> GameViewDto (read-only, без событий).
pub fn session_to_view(session: &GameSession) -> GameViewDto {
    let current_fisherman = match session.phase() {
        GamePhase::InProgress => session
            .turn_order()
            .get(session.turn_index())
            .map(|n| n.as_str().to_string()),
        GamePhase::Ended => None,
    };

    GameViewDto {
        game_id: session.game_id(),
        phase: session.phase(),
        current_fisherman,
        turn: session.turn_index(),
        total_turns: session.turn_order().len(),
        remaining_fish: session.remaining_fish(),
        casting: session.is_casting(),
        pairings: session.pairings().iter().map(pairing_to_dto).collect(),
    }
}
