//! Single-item mutations against the backend.
//!
//! The gateway never writes to the [`CollectionStore`](crate::store::CollectionStore).
//! A successful call returns a [`MutationOutcome`]; refreshing the store is
//! the caller's job, and nothing is applied locally before the backend has
//! confirmed it.

use crate::backend::{BackendResult, GameBackend};
use gameshelf_model::{Game, GameDraft, GameId, GamePatch};
use std::fmt;
use std::sync::Arc;

/// What the backend confirmed.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Created(Game),
    Updated(Game),
    Deleted(GameId),
}

impl MutationOutcome {
    pub fn game_id(&self) -> &GameId {
        match self {
            MutationOutcome::Created(game) | MutationOutcome::Updated(game) => &game.id,
            MutationOutcome::Deleted(id) => id,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match self {
            MutationOutcome::Created(game) | MutationOutcome::Updated(game) => Some(game),
            MutationOutcome::Deleted(_) => None,
        }
    }
}

impl fmt::Display for MutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationOutcome::Created(game) => write!(f, "creating '{}'", game.title),
            MutationOutcome::Updated(game) => write!(f, "updating '{}'", game.title),
            MutationOutcome::Deleted(id) => write!(f, "deleting game {id}"),
        }
    }
}

#[derive(Clone)]
pub struct MutationGateway {
    backend: Arc<dyn GameBackend>,
}

impl fmt::Debug for MutationGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationGateway").finish_non_exhaustive()
    }
}

impl MutationGateway {
    pub fn new(backend: Arc<dyn GameBackend>) -> Self {
        Self { backend }
    }

    pub async fn create(&self, draft: &GameDraft) -> BackendResult<MutationOutcome> {
        let created = self.backend.create_game(draft).await.inspect_err(|err| {
            tracing::warn!(title = %draft.title, error = %err, "Create failed");
        })?;
        tracing::info!(id = %created.id, title = %created.title, "Game created");
        Ok(MutationOutcome::Created(created))
    }

    pub async fn update(&self, id: &GameId, patch: &GamePatch) -> BackendResult<MutationOutcome> {
        let updated = self.backend.update_game(id, patch).await.inspect_err(|err| {
            tracing::warn!(%id, error = %err, "Update failed");
        })?;
        tracing::info!(%id, "Game updated");
        Ok(MutationOutcome::Updated(updated))
    }

    pub async fn delete(&self, id: &GameId) -> BackendResult<MutationOutcome> {
        self.backend.delete_game(id).await.inspect_err(|err| {
            tracing::warn!(%id, error = %err, "Delete failed");
        })?;
        tracing::info!(%id, "Game deleted");
        Ok(MutationOutcome::Deleted(id.clone()))
    }
}
