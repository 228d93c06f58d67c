use serde::{Deserialize, Serialize};

/// Backend-assigned identifier for a game.
///
/// Opaque to the client: it is only compared for equality and echoed back
/// in request paths.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn new(raw: impl Into<String>) -> Self {
        GameId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An id the backend never assigned (missing `_id` in a payload).
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(raw: &str) -> Self {
        GameId(raw.to_string())
    }
}

impl From<String> for GameId {
    fn from(raw: String) -> Self {
        GameId(raw)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
