use crate::api_client::HttpBackend;
use crate::backend::GameBackend;
use crate::config::ClientConfig;
use crate::error::{LibraryError, Result};
use crate::form::{GameForm, ReviewForm};
use crate::gateway::{MutationGateway, MutationOutcome};
use crate::query::pipeline::pages_for;
use crate::query::{DerivedView, Filter, QueryParams, SortKey, derive_view};
use crate::store::{CollectionStore, ReloadOutcome};
use gameshelf_model::{Game, GameDraft, GameId, GamePatch, GameStatus, Review};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Values present in the current collection, for populating filter pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
    pub statuses: Vec<GameStatus>,
}

/// One user's session over the game catalog: the store, the gateway, and
/// the query parameters driving the visible page.
#[derive(Debug, Clone)]
pub struct GameLibrary {
    store: CollectionStore,
    gateway: MutationGateway,
    params: QueryParams,
}

impl GameLibrary {
    pub fn new(backend: Arc<dyn GameBackend>, page_size: NonZeroUsize) -> Self {
        Self {
            store: CollectionStore::new(Arc::clone(&backend)),
            gateway: MutationGateway::new(backend),
            params: QueryParams::new(page_size),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let backend = HttpBackend::from_config(config)?;
        Ok(Self::new(Arc::new(backend), config.page_size))
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub async fn reload(&self) -> Result<ReloadOutcome> {
        Ok(self.store.reload().await?)
    }

    /// Derive the current page. A page left dangling by a reload is pulled
    /// back to 1 and stored that way.
    pub fn view(&mut self) -> DerivedView {
        let collection = self.store.current_collection();
        let view = derive_view(collection.games(), &self.params);
        if self.params.reconcile(view.page) {
            tracing::debug!(page = view.page, "Requested page no longer exists; reset");
        }
        view
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.params.set_search_text(text);
    }

    pub fn set_platform_filter(&mut self, filter: Filter<String>) {
        self.params.set_platform_filter(filter);
    }

    pub fn set_genre_filter(&mut self, filter: Filter<String>) {
        self.params.set_genre_filter(filter);
    }

    pub fn set_status_filter(&mut self, filter: Filter<GameStatus>) {
        self.params.set_status_filter(filter);
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.params.set_sort_key(key);
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.params.set_page_size(page_size);
    }

    pub fn reset_filters(&mut self) {
        self.params.reset_filters();
    }

    /// Go to page `requested`, clamped to the pages the current search and
    /// filters produce. Returns the page selected.
    pub fn set_page(&mut self, requested: usize) -> usize {
        let total_pages = self
            .store
            .with_collection(|collection| pages_for(collection.games(), &self.params));
        self.params.set_page(requested, total_pages)
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.params.page().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.params.page().saturating_sub(1))
    }

    /// Fetch one game straight from the backend. The store is not touched.
    pub async fn get(&self, id: &GameId) -> Result<Game> {
        Ok(self.store.backend().get_game(id).await?)
    }

    /// Reviews from the backend, optionally only those for one game. Reviews
    /// are not cached; every call fetches.
    pub async fn reviews(&self, game: Option<&GameId>) -> Result<Vec<Review>> {
        let mut reviews = self.store.backend().list_reviews().await?;
        if let Some(game) = game {
            reviews.retain(|review| &review.game_id == game);
        }
        Ok(reviews)
    }

    /// Validate and post a review. The game collection is left as it is.
    pub async fn add_review(&self, form: &ReviewForm) -> Result<Review> {
        let draft = form.validate()?;
        let review = self
            .store
            .backend()
            .create_review(&draft)
            .await
            .inspect_err(|err| {
                tracing::warn!(game = %draft.game_id, error = %err, "Review failed");
            })?;
        tracing::info!(id = %review.id, game = %review.game_id, "Review added");
        Ok(review)
    }

    pub fn filter_options(&self) -> FilterOptions {
        self.store.with_collection(|collection| {
            let platforms: BTreeSet<&str> = collection
                .iter()
                .map(|game| game.platform.as_str())
                .filter(|platform| !platform.is_empty())
                .collect();
            let genres: BTreeSet<&str> = collection
                .iter()
                .map(|game| game.genre.as_str())
                .filter(|genre| !genre.is_empty())
                .collect();
            let statuses = GameStatus::all()
                .iter()
                .copied()
                .filter(|status| collection.iter().any(|game| game.status == Some(*status)))
                .collect();

            FilterOptions {
                platforms: platforms.into_iter().map(str::to_string).collect(),
                genres: genres.into_iter().map(str::to_string).collect(),
                statuses,
            }
        })
    }

    pub async fn create(&self, draft: &GameDraft) -> Result<MutationOutcome> {
        let outcome = self.gateway.create(draft).await?;
        self.refresh_after(outcome).await
    }

    pub async fn update(&self, id: &GameId, patch: &GamePatch) -> Result<MutationOutcome> {
        let outcome = self.gateway.update(id, patch).await?;
        self.refresh_after(outcome).await
    }

    pub async fn delete(&self, id: &GameId) -> Result<MutationOutcome> {
        let outcome = self.gateway.delete(id).await?;
        self.refresh_after(outcome).await
    }

    /// Validate a form and submit it: a create without `id`, a full
    /// replacement update with one.
    pub async fn save_form(&self, form: &GameForm, id: Option<&GameId>) -> Result<MutationOutcome> {
        let draft = form.validate_at(crate::form::current_year())?;
        match id {
            None => self.create(&draft).await,
            Some(id) => self.update(id, &GamePatch::from(draft)).await,
        }
    }

    async fn refresh_after(&self, outcome: MutationOutcome) -> Result<MutationOutcome> {
        match self.store.reload().await {
            Ok(_) => Ok(outcome),
            Err(source) => Err(LibraryError::RefreshAfterMutation { outcome, source }),
        }
    }
}
