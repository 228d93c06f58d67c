//! # gameshelf core
//!
//! Client-side view layer over a remote game catalog.
//!
//! ## Overview
//!
//! - **Collection store** ([`store`]): the authoritative local copy of every
//!   game, replaced wholesale on each reload.
//! - **Query pipeline** ([`query`]): a pure function from (collection, query
//!   parameters) to a searched, filtered, sorted and paginated view.
//! - **Mutation gateway** ([`gateway`]): create/update/delete against the
//!   backend. It never touches the store; callers reload afterwards.
//! - **Session facade** ([`library`]): ties the three together for a
//!   presentation layer.
//!
//! Transport lives behind the [`backend::GameBackend`] port, with
//! [`api_client::HttpBackend`] as the REST implementation.
//!
//! ## Examples
//!
//! ```no_run
//! use gameshelf_core::prelude::*;
//!
//! async fn first_page(config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut library = GameLibrary::from_config(config)?;
//!     library.reload().await?;
//!     library.set_search_text("zelda");
//!     library.set_sort_key(SortKey::RatingDesc);
//!
//!     let view = library.view();
//!     for game in view.page_items() {
//!         println!("{} ({})", game.title, game.platform);
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod api_client;
pub mod backend;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod library;
pub mod prelude;
pub mod query;
pub mod store;

pub use gameshelf_model as model;
