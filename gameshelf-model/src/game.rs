use crate::ids::GameId;
use crate::lenient;
use crate::status::GameStatus;
use serde::{Deserialize, Serialize};

/// A single entry in the game library as returned by `GET /games`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(rename = "_id", default, deserialize_with = "lenient::id")]
    pub id: GameId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub platform: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient::year")]
    pub release_year: i32,
    /// Whole stars, 0 to 5.
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "lenient::hours")]
    pub hours_played: f64,
    /// `None` when the record carries no status or one outside the known set.
    #[serde(
        default,
        deserialize_with = "lenient::status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<GameStatus>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Game {
    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.api_name()).unwrap_or("")
    }
}
