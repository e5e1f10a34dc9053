use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Name, Roster};

/// Сторона игры: кто ловит и кого ловят.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RosterSide {
    Fishermen,
    Fish,
}

impl fmt::Display for RosterSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterSide::Fishermen => f.write_str("fishermen"),
            RosterSide::Fish => f.write_str("fish"),
        }
    }
}

/// Разобрать сырой текст (одно имя на строку) в ростер.
///
/// - разделитель строк `\n` или `\r\n`;
/// - каждая строка обрезается по краям;
/// - пустые строки выбрасываются;
/// - порядок сохраняется, дубликаты НЕ удаляются.
pub fn parse_names(text: &str) -> Roster {
    text.lines().filter_map(Name::new).collect()
}

/// Собрать ростер из уже готовых строк (например, из тестов или API).
pub fn roster_from<I, S>(items: I) -> Roster
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items.into_iter().filter_map(Name::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_blank_lines_and_keeps_order() {
        let names = parse_names("  Ann\r\n\n Bob \n\t\nAnn\n");
        let plain: Vec<&str> = names.iter().map(Name::as_str).collect();
        assert_eq!(plain, vec!["Ann", "Bob", "Ann"]);
    }

    #[test]
    fn parse_empty_text_gives_empty_roster() {
        assert!(parse_names("").is_empty());
        assert!(parse_names("\n \r\n").is_empty());
    }
}
