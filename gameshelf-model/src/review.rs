use crate::ids::GameId;
use crate::lenient;
use serde::{Deserialize, Serialize};

/// A player's review as returned by `GET /reviews`.
///
/// The backend may send `gameId` as a bare id or as the populated game
/// document; either way only the id is kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::reference")]
    pub game_id: GameId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub author: String,
    /// Whole stars, 0 to 5.
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

/// Body of `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub game_id: GameId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub rating: u8,
    pub text: String,
}
