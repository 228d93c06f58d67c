//! Collection store: the authoritative local copy of the game catalog.
//!
//! The collection is replaced wholesale on every successful reload. Readers
//! get an `Arc` snapshot, so a reload landing mid-render never shows them a
//! half-written collection.
//!
//! Overlapping reloads are ordered by ticket: each call to
//! [`CollectionStore::reload`] takes the next ticket before it awaits the
//! backend, and a response is applied only if no newer reload has been
//! requested since. Stale responses are dropped, whichever order they
//! resolve in.

use crate::backend::GameBackend;
use crate::error::TransportError;
use gameshelf_model::{Game, GameId};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// An immutable, de-duplicated list of games in backend order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    games: Vec<Game>,
}

impl Collection {
    /// Build a collection from a backend listing.
    ///
    /// Ids must be unique; later duplicates and records without an id are
    /// dropped with a warning.
    pub fn from_fetched(games: Vec<Game>) -> Self {
        let mut seen = HashSet::with_capacity(games.len());
        let mut kept = Vec::with_capacity(games.len());

        for game in games {
            if game.id.is_blank() {
                tracing::warn!(title = %game.title, "Dropping game without an id");
                continue;
            }
            if !seen.insert(game.id.clone()) {
                tracing::warn!(id = %game.id, "Dropping duplicate game id");
                continue;
            }
            kept.push(game);
        }

        Self { games: kept }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.games.iter().find(|game| &game.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.games.iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Game;
    type IntoIter = std::slice::Iter<'a, Game>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}

/// What a reload did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The fetched collection is now current.
    Applied { generation: u64, count: usize },
    /// A newer reload was requested while this one was in flight; its
    /// result was discarded.
    Superseded { generation: u64, latest: u64 },
}

#[derive(Debug, Default)]
struct Snapshot {
    collection: Arc<Collection>,
    /// Ticket of the reload that produced `collection`. 0 before the first.
    generation: u64,
    last_error: Option<String>,
}

/// Shared handle to the current collection.
///
/// Cloning is cheap and every clone sees the same state.
#[derive(Clone)]
pub struct CollectionStore {
    backend: Arc<dyn GameBackend>,
    snapshot: Arc<RwLock<Snapshot>>,
    requested: Arc<AtomicU64>,
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot.read();
        f.debug_struct("CollectionStore")
            .field("games", &snapshot.collection.len())
            .field("generation", &snapshot.generation)
            .field("requested", &self.requested.load(Ordering::Acquire))
            .field("last_error", &snapshot.last_error)
            .finish()
    }
}

impl CollectionStore {
    pub fn new(backend: Arc<dyn GameBackend>) -> Self {
        Self {
            backend,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
            requested: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn backend(&self) -> &Arc<dyn GameBackend> {
        &self.backend
    }

    /// Fetch the full collection and replace the current one.
    ///
    /// On failure the previous collection stays visible and the error is
    /// both returned and remembered in [`last_error`](Self::last_error),
    /// unless a newer reload has already been requested, in which case only
    /// the caller hears about it.
    pub async fn reload(&self) -> Result<ReloadOutcome, TransportError> {
        let ticket = self.requested.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(ticket, "Reloading game collection");

        let fetched = self.backend.list_games().await;

        let mut snapshot = self.snapshot.write();
        let latest = self.requested.load(Ordering::Acquire);
        let current = ticket == latest && ticket > snapshot.generation;

        match fetched {
            Ok(games) if current => {
                let collection = Collection::from_fetched(games);
                let count = collection.len();
                snapshot.collection = Arc::new(collection);
                snapshot.generation = ticket;
                snapshot.last_error = None;
                tracing::info!(generation = ticket, count, "Game collection replaced");
                Ok(ReloadOutcome::Applied {
                    generation: ticket,
                    count,
                })
            }
            Ok(_) => {
                tracing::debug!(ticket, latest, "Discarding superseded reload");
                Ok(ReloadOutcome::Superseded {
                    generation: ticket,
                    latest,
                })
            }
            Err(err) => {
                if current {
                    tracing::warn!(ticket, error = %err, "Reload failed; keeping previous collection");
                    snapshot.last_error = Some(err.to_string());
                } else {
                    tracing::debug!(ticket, latest, error = %err, "Superseded reload failed");
                }
                Err(err)
            }
        }
    }

    /// Read-only snapshot of the current collection.
    pub fn current_collection(&self) -> Arc<Collection> {
        Arc::clone(&self.snapshot.read().collection)
    }

    /// Run `f` against the current collection without taking a snapshot.
    pub fn with_collection<T>(&self, f: impl FnOnce(&Collection) -> T) -> T {
        let guard = self.snapshot.read();
        f(&guard.collection)
    }

    /// Message of the most recent reload failure, cleared by the next
    /// successful reload.
    pub fn last_error(&self) -> Option<String> {
        self.snapshot.read().last_error.clone()
    }

    /// Generation of the collection currently held. 0 until the first
    /// successful reload.
    pub fn generation(&self) -> u64 {
        self.snapshot.read().generation
    }

    pub fn is_loaded(&self) -> bool {
        self.generation() > 0
    }
}
