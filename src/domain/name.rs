use std::fmt;

use serde::{Deserialize, Serialize};

/// Имя участника (рыбака или рыбы).
///
/// Всегда непустое и уже обрезанное по краям. Дубликаты внутри ростера
/// допустимы: два `Name("Anna")` — это два разных участника с одинаковой подписью.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Нормализовать сырую строку в имя. Пустая (после trim) строка -> None.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank() {
        assert_eq!(Name::new("  Bob \t").unwrap().as_str(), "Bob");
        assert!(Name::new("   ").is_none());
        assert!(Name::new("").is_none());
    }

    #[test]
    fn equality_is_exact_after_trim() {
        assert_eq!(Name::new(" x"), Name::new("x "));
        assert_ne!(Name::new("x"), Name::new("X"));
    }
}
