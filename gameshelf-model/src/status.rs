use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Play-through status of a game. The backend stores the Spanish labels
/// verbatim, so those are the wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "Por jugar")]
    Backlog,
    #[serde(rename = "Jugando")]
    Playing,
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Abandonado")]
    Abandoned,
}

impl GameStatus {
    pub fn all() -> &'static [GameStatus] {
        use GameStatus::*;
        &[Backlog, Playing, Completed, Abandoned]
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            GameStatus::Backlog => "Por jugar",
            GameStatus::Playing => "Jugando",
            GameStatus::Completed => "Completado",
            GameStatus::Abandoned => "Abandonado",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Raised when a string is not one of the four status labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown game status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for GameStatus {
    type Err = UnknownStatus;

    /// Matching is exact, like the backend's enum validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameStatus::all()
            .iter()
            .copied()
            .find(|status| status.api_name() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}
