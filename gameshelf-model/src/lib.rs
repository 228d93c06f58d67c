//! Core data model definitions shared across gameshelf crates.
//!
//! The backend speaks camelCase JSON and is not strict about field types, so
//! decoding here is lenient: a missing or malformed field becomes its neutral
//! default instead of failing the whole payload.
#![allow(missing_docs)]

pub mod catalog;
pub mod draft;
pub mod envelope;
pub mod game;
pub mod ids;
mod lenient;
pub mod review;
pub mod status;

pub use catalog::{DEFAULT_GENRE, DEFAULT_PLATFORM, KNOWN_GENRES, KNOWN_PLATFORMS};
pub use draft::{GameDraft, GamePatch};
pub use envelope::{decode_payload, error_message};
pub use game::Game;
pub use ids::GameId;
pub use review::{Review, ReviewDraft};
pub use status::{GameStatus, UnknownStatus};
