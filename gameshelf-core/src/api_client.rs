use crate::backend::{BackendResult, GameBackend};
use crate::config::ClientConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use gameshelf_model::{
    Game, GameDraft, GameId, GamePatch, Review, ReviewDraft, decode_payload, error_message,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST implementation of [`GameBackend`] over `{base}/games` and
/// `{base}/reviews`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Add `http://` when no scheme is given and drop trailing slashes, so
/// `localhost:5001/api/` and `http://localhost:5001/api` mean the same thing.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let normalized = normalize_base_url(base_url);
        if normalized != base_url {
            tracing::debug!(from = base_url, to = %normalized, "Normalized base URL");
        }

        let parsed = Url::parse(&normalized)
            .map_err(|err| TransportError::InvalidUrl(format!("{normalized}: {err}")))?;
        if parsed.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(normalized));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;

        tracing::info!(base_url = %parsed, "Creating games API client");

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &ClientConfig) -> BackendResult<Self> {
        Self::new(&config.server_url, config.request_timeout())
    }

    /// `{base}/games` or `{base}/games/{id}`. The id is percent-encoded as a
    /// single path segment.
    pub fn games_url(&self, id: Option<&GameId>) -> Url {
        self.resource_url("games", id.map(GameId::as_str))
    }

    pub fn reviews_url(&self) -> Url {
        self.resource_url("reviews", None)
    }

    fn resource_url(&self, resource: &str, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    async fn send(&self, url: &Url, request: RequestBuilder) -> BackendResult<reqwest::Response> {
        let response = request.send().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| error_message(&value))
            .or_else(|| Some(body.trim().to_string()).filter(|text| !text.is_empty()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        tracing::warn!(%url, status = status.as_u16(), %message, "Games API request failed");
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &Url, request: RequestBuilder) -> BackendResult<T> {
        let response = self.send(url, request).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(TransportError::Decode(format!("empty response from {url}")));
        }

        let bytes = response.bytes().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|err| TransportError::Decode(format!("{url}: {err}")))?;
        decode_payload(body).map_err(|err| TransportError::Decode(format!("{url}: {err}")))
    }
}

#[async_trait]
impl GameBackend for HttpBackend {
    async fn list_games(&self) -> BackendResult<Vec<Game>> {
        let url = self.games_url(None);
        let games: Vec<Game> = self.fetch(&url, self.client.get(url.clone())).await?;
        tracing::debug!(count = games.len(), "Fetched game list");
        Ok(games)
    }

    async fn get_game(&self, id: &GameId) -> BackendResult<Game> {
        let url = self.games_url(Some(id));
        self.fetch(&url, self.client.get(url.clone())).await
    }

    async fn create_game(&self, draft: &GameDraft) -> BackendResult<Game> {
        let url = self.games_url(None);
        self.fetch(&url, self.client.post(url.clone()).json(draft)).await
    }

    async fn update_game(&self, id: &GameId, patch: &GamePatch) -> BackendResult<Game> {
        let url = self.games_url(Some(id));
        self.fetch(&url, self.client.put(url.clone()).json(patch)).await
    }

    async fn delete_game(&self, id: &GameId) -> BackendResult<()> {
        let url = self.games_url(Some(id));
        self.send(&url, self.client.delete(url.clone())).await?;
        Ok(())
    }

    async fn list_reviews(&self) -> BackendResult<Vec<Review>> {
        let url = self.reviews_url();
        let reviews: Vec<Review> = self.fetch(&url, self.client.get(url.clone())).await?;
        tracing::debug!(count = reviews.len(), "Fetched review list");
        Ok(reviews)
    }

    async fn create_review(&self, draft: &ReviewDraft) -> BackendResult<Review> {
        let url = self.reviews_url();
        self.fetch(&url, self.client.post(url.clone()).json(draft)).await
    }
}
