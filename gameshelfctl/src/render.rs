//! Plain-text rendering for terminal output.

use gameshelf_core::model::{KNOWN_GENRES, KNOWN_PLATFORMS};
use gameshelf_core::prelude::*;
use std::fmt::Write as _;

const TITLE_WIDTH: usize = 32;

pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn game_row(game: &Game) -> String {
    let year = if game.release_year > 0 {
        game.release_year.to_string()
    } else {
        "-".to_string()
    };
    format!(
        "{:<24} {:<width$} {:<16} {:<12} {:>4} {} {:>7.1}h  {}",
        game.id.as_str(),
        truncate(&game.title, TITLE_WIDTH),
        truncate(&game.platform, 16),
        truncate(&game.genre, 12),
        year,
        stars(game.rating),
        game.hours_played,
        game.status_label(),
        width = TITLE_WIDTH,
    )
}

pub fn active_query(params: &QueryParams) -> Option<String> {
    let mut parts = Vec::new();
    if !params.search_text().trim().is_empty() {
        parts.push(format!("search \"{}\"", params.search_text().trim()));
    }
    if let Some(platform) = params.platform_filter().selected() {
        parts.push(format!("platform {platform}"));
    }
    if let Some(genre) = params.genre_filter().selected() {
        parts.push(format!("genre {genre}"));
    }
    if let Some(status) = params.status_filter().selected() {
        parts.push(format!("status {status}"));
    }
    if params.sort_key() != SortKey::None {
        parts.push(format!("sorted by {}", params.sort_key().label()));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// The current page, a footer with totals, or an explicit empty state.
pub fn page(view: &DerivedView, params: &QueryParams) -> String {
    let mut out = String::new();

    if view.is_empty() {
        match active_query(params) {
            Some(query) => {
                let _ = writeln!(out, "No games match {query}.");
            }
            None => {
                let _ = writeln!(out, "The library is empty. Add one with `gameshelfctl add`.");
            }
        }
        return out;
    }

    for game in view.page_items() {
        let _ = writeln!(out, "{}", game_row(game));
    }
    let first = view.page_range.start + 1;
    let last = view.page_range.end;
    let _ = writeln!(
        out,
        "\nShowing {first}-{last} of {} games (page {} of {})",
        view.total_count, view.page, view.total_pages
    );
    if let Some(query) = active_query(params) {
        let _ = writeln!(out, "Filtered by {query}");
    }
    out
}

pub fn detail(game: &Game) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", game.title);
    let _ = writeln!(out, "  id:          {}", game.id);
    let _ = writeln!(out, "  platform:    {}", game.platform);
    let _ = writeln!(out, "  genre:       {}", game.genre);
    let _ = writeln!(out, "  year:        {}", game.release_year);
    let _ = writeln!(out, "  rating:      {} ({}/5)", stars(game.rating), game.rating);
    let _ = writeln!(out, "  hours:       {}", game.hours_played);
    let _ = writeln!(out, "  status:      {}", game.status_label());
    if let Some(url) = &game.image_url {
        let _ = writeln!(out, "  image:       {url}");
    }
    if !game.description.is_empty() {
        let _ = writeln!(out, "\n{}", game.description);
    }
    out
}

pub fn reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews yet.\n".to_string();
    }
    let mut out = String::new();
    for review in reviews {
        let author = if review.author.is_empty() {
            "anonymous"
        } else {
            review.author.as_str()
        };
        let _ = writeln!(
            out,
            "{} {} by {} on game {}",
            stars(review.rating),
            review.id,
            author,
            review.game_id
        );
        if !review.text.is_empty() {
            let _ = writeln!(out, "  {}", review.text);
        }
    }
    out
}

/// Values present in the library, then the form's suggestions for new
/// entries.
pub fn filter_options(options: &FilterOptions) -> String {
    let statuses: Vec<&str> = options.statuses.iter().map(GameStatus::api_name).collect();
    format!(
        "Platforms: {}\nGenres:    {}\nStatuses:  {}\n\nSuggested platforms: {}\nSuggested genres:    {}\n",
        options.platforms.join(", "),
        options.genres.join(", "),
        statuses.join(", "),
        KNOWN_PLATFORMS.join(", "),
        KNOWN_GENRES.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, title: &str) -> Game {
        Game {
            id: GameId::new(id),
            title: title.into(),
            platform: "PC".into(),
            genre: "RPG".into(),
            release_year: 2020,
            rating: 3,
            hours_played: 12.0,
            status: Some(GameStatus::Playing),
            ..Game::default()
        }
    }

    #[test]
    fn stars_cap_at_five() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn long_titles_are_cut() {
        assert_eq!(truncate("Hades", 8), "Hades");
        assert_eq!(truncate("Disco Elysium", 8), "Disco E…");
    }

    #[test]
    fn empty_view_explains_why() {
        let mut params = QueryParams::default();
        let view = derive_view(&[], &params);
        assert!(page(&view, &params).contains("The library is empty"));

        params.set_search_text("zelda");
        params.set_status_filter(Filter::Only(GameStatus::Completed));
        let text = page(&view, &params);
        assert!(text.contains("No games match search \"zelda\", status Completado"));
    }

    #[test]
    fn footer_reports_range_and_totals() {
        let games: Vec<Game> = (0..13).map(|i| game(&i.to_string(), "Doom")).collect();
        let mut params = QueryParams::default();
        params.set_page(2, std::num::NonZeroUsize::new(2).unwrap());
        let view = derive_view(&games, &params);
        let text = page(&view, &params);
        assert!(text.contains("Showing 13-13 of 13 games (page 2 of 2)"));
        assert_eq!(text.lines().filter(|l| l.contains("Doom")).count(), 1);
    }

    #[test]
    fn options_list_present_values_then_suggestions() {
        let options = FilterOptions {
            platforms: vec!["PC".into(), "Xbox".into()],
            genres: vec!["RPG".into()],
            statuses: vec![GameStatus::Playing],
        };
        let text = filter_options(&options);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Platforms: PC, Xbox");
        assert_eq!(lines[2], "Statuses:  Jugando");
        assert!(lines[4].starts_with("Suggested platforms: PC, PlayStation, Xbox"));
        assert!(lines[5].contains("Simulación"));
    }

    #[test]
    fn reviews_render_with_fallbacks() {
        assert_eq!(reviews(&[]), "No reviews yet.\n");

        let text = reviews(&[Review {
            id: "r1".into(),
            game_id: GameId::new("g1"),
            rating: 4,
            text: "Muy bueno".into(),
            ..Review::default()
        }]);
        assert_eq!(text, "★★★★☆ r1 by anonymous on game g1\n  Muy bueno\n");
    }

    #[test]
    fn detail_lists_every_field() {
        let text = detail(&game("abc", "Hades"));
        assert!(text.starts_with("Hades\n"));
        assert!(text.contains("status:      Jugando"));
        assert!(text.contains("rating:      ★★★☆☆ (3/5)"));
    }
}
