use crate::status::GameStatus;
use serde::{Deserialize, Serialize};

/// Body of `POST /games`: every field except the backend-assigned id.
///
/// Numeric fields are real numbers here; text-to-number coercion happens
/// before a draft is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDraft {
    pub title: String,
    pub description: String,
    pub platform: String,
    pub genre: String,
    pub release_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: GameStatus,
    pub rating: u8,
    pub hours_played: f64,
}

/// Body of `PUT /games/{id}`. Absent fields are left untouched by the
/// backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_played: Option<f64>,
}

/// A full draft becomes a replace-everything patch. An empty image URL is
/// sent explicitly so a cleared field is cleared on the backend too.
impl From<GameDraft> for GamePatch {
    fn from(draft: GameDraft) -> Self {
        GamePatch {
            title: Some(draft.title),
            description: Some(draft.description),
            platform: Some(draft.platform),
            genre: Some(draft.genre),
            release_year: Some(draft.release_year),
            image_url: Some(draft.image_url.unwrap_or_default()),
            status: Some(draft.status),
            rating: Some(draft.rating),
            hours_played: Some(draft.hours_played),
        }
    }
}
