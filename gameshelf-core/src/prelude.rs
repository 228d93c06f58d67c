//! Common imports for presentation layers built on the core.

pub use crate::api_client::HttpBackend;
pub use crate::backend::GameBackend;
pub use crate::config::ClientConfig;
pub use crate::error::{LibraryError, TransportError};
pub use crate::form::{FormError, FormField, GameForm, ReviewForm};
pub use crate::gateway::{MutationGateway, MutationOutcome};
pub use crate::library::{FilterOptions, GameLibrary};
pub use crate::query::{DerivedView, Filter, QueryParams, SortKey, derive_view};
pub use crate::store::{Collection, CollectionStore, ReloadOutcome};

pub use gameshelf_model::{Game, GameDraft, GameId, GamePatch, GameStatus, Review, ReviewDraft};
