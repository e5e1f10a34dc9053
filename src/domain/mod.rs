//! Доменная модель игры: имена участников, ростеры, пары (рыбак + рыба).

pub mod name;
pub mod pairing;
pub mod roster;

// Базовые идентификаторы
pub type GameId = u64;
pub type TurnIndex = usize;

/// Ростер — упорядоченный список имён одной стороны.
pub type Roster = Vec<Name>;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Name и т.п.
pub use name::*;
pub use pairing::*;
pub use roster::*;
