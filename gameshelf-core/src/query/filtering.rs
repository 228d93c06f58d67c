//! Search and field filters, the first two pipeline stages.

use super::types::QueryParams;
use gameshelf_model::Game;

/// Normalized search needle, or `None` when the search is a no-op.
pub fn normalize_search(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Case-insensitive substring match on the title.
pub fn title_matches(game: &Game, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => game.title.to_lowercase().contains(needle),
    }
}

/// Apply search then filters, preserving input order.
pub fn select<'a>(games: &'a [Game], params: &QueryParams) -> Vec<&'a Game> {
    let needle = normalize_search(params.search_text());
    games
        .iter()
        .filter(|game| title_matches(game, needle.as_deref()))
        .filter(|game| params.admits(game))
        .collect()
}
