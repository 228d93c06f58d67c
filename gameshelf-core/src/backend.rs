//! Port to the games backend.
//!
//! The store and gateway only ever talk to this trait, so the pipeline and
//! its state can be exercised without a network.

use crate::error::TransportError;
use async_trait::async_trait;
use gameshelf_model::{Game, GameDraft, GameId, GamePatch, Review, ReviewDraft};

pub type BackendResult<T> = std::result::Result<T, TransportError>;

/// CRUD surface of the `/games` resource, plus the `/reviews` list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameBackend: Send + Sync {
    /// `GET /games`
    async fn list_games(&self) -> BackendResult<Vec<Game>>;

    /// `GET /games/{id}`
    async fn get_game(&self, id: &GameId) -> BackendResult<Game>;

    /// `POST /games`
    async fn create_game(&self, draft: &GameDraft) -> BackendResult<Game>;

    /// `PUT /games/{id}`
    async fn update_game(&self, id: &GameId, patch: &GamePatch) -> BackendResult<Game>;

    /// `DELETE /games/{id}`
    async fn delete_game(&self, id: &GameId) -> BackendResult<()>;

    /// `GET /reviews`
    async fn list_reviews(&self) -> BackendResult<Vec<Review>>;

    /// `POST /reviews`
    async fn create_review(&self, draft: &ReviewDraft) -> BackendResult<Review>;
}
