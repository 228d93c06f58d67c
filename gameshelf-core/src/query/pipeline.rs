use super::filtering::select;
use super::pagination::{page_range, total_pages};
use super::sorting::sort_games;
use super::types::QueryParams;
use gameshelf_model::Game;
use std::num::NonZeroUsize;
use std::ops::Range;

/// Everything the presentation layer renders for one set of parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedView {
    /// Search, filters and sort applied; not yet paginated.
    pub filtered_sorted: Vec<Game>,
    pub total_count: usize,
    pub total_pages: usize,
    /// Page actually rendered. Differs from the requested page when that
    /// one no longer exists.
    pub page: usize,
    pub page_range: Range<usize>,
}

impl DerivedView {
    /// The slice of games shown on the current page.
    pub fn page_items(&self) -> &[Game] {
        &self.filtered_sorted[self.page_range.clone()]
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Derive the visible view from a collection snapshot.
///
/// Never fails. A requested page past the last one falls back to page 1,
/// which the caller should write back with
/// [`QueryParams::reconcile`](super::types::QueryParams::reconcile).
pub fn derive_view(games: &[Game], params: &QueryParams) -> DerivedView {
    let mut filtered_sorted: Vec<Game> = select(games, params).into_iter().cloned().collect();
    sort_games(&mut filtered_sorted, params.sort_key());

    let page_size = params.page_size();
    let total_count = filtered_sorted.len();
    let total_pages = total_pages(total_count, page_size).get();
    let page = if params.page() > total_pages {
        1
    } else {
        params.page()
    };
    let page_range = page_range(page, page_size, total_count);

    DerivedView {
        filtered_sorted,
        total_count,
        total_pages,
        page,
        page_range,
    }
}

/// Match count for `params` without cloning or sorting anything. The page
/// field does not affect the result.
pub fn count_matches(games: &[Game], params: &QueryParams) -> usize {
    select(games, params).len()
}

/// Pages available for `params`, for clamping page navigation.
pub fn pages_for(games: &[Game], params: &QueryParams) -> NonZeroUsize {
    total_pages(count_matches(games, params), params.page_size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::{Filter, SortKey};
    use gameshelf_model::{GameId, GameStatus};
    use proptest::prelude::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn numbered(count: usize) -> Vec<Game> {
        (0..count)
            .map(|i| Game {
                id: GameId::new(format!("g{i:02}")),
                title: format!("Game {i:02}"),
                platform: (if i % 2 == 0 { "PC" } else { "PlayStation 5" }).into(),
                genre: "RPG".into(),
                status: Some(GameStatus::Backlog),
                ..Game::default()
            })
            .collect()
    }

    #[test]
    fn thirteen_games_split_over_two_pages() {
        let games = numbered(13);
        let mut params = QueryParams::default();

        let view = derive_view(&games, &params);
        assert_eq!(view.total_count, 13);
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.page_items().len(), 12);

        params.set_page(2, nz(view.total_pages));
        let view = derive_view(&games, &params);
        assert_eq!(view.page, 2);
        assert_eq!(view.page_items().len(), 1);
        assert_eq!(view.page_items()[0].id.as_str(), "g12");
        assert!(!view.has_next());
        assert!(view.has_previous());
    }

    #[test]
    fn search_finds_title_regardless_of_case() {
        let mut games = numbered(3);
        games[1].title = "The Legend of Zelda".into();

        for needle in ["zelda", "ZELDA", "  Zelda  "] {
            let mut params = QueryParams::default();
            params.set_search_text(needle);
            let view = derive_view(&games, &params);
            assert_eq!(view.total_count, 1, "needle {needle:?}");
            assert_eq!(view.page_items()[0].id.as_str(), "g01");
        }
    }

    #[test]
    fn status_filter_counts_only_that_status() {
        let mut games = numbered(5);
        games[0].status = Some(GameStatus::Completed);
        games[3].status = Some(GameStatus::Completed);
        games[4].status = None;

        let mut params = QueryParams::default();
        params.set_status_filter(Filter::Only(GameStatus::Completed));
        let view = derive_view(&games, &params);
        assert_eq!(view.total_count, 2);
        assert!(
            view.page_items()
                .iter()
                .all(|g| g.status == Some(GameStatus::Completed))
        );
    }

    #[test]
    fn narrowing_past_current_page_falls_back_to_first() {
        let mut games = numbered(30);
        for game in games.iter_mut().take(5) {
            game.genre = "Puzzle".into();
        }
        // Restored parameters can point at a page that the new filter
        // removes; the view must not come back empty.
        let params = QueryParams::new(nz(12)).with_page(nz(3));
        let mut narrowed = params.clone();
        narrowed.set_genre_filter(Filter::Only("Puzzle".into()));
        let narrowed = narrowed.with_page(nz(3));

        let view = derive_view(&games, &narrowed);
        assert_eq!(view.total_count, 5);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_items().len(), 5);

        let mut stored = narrowed.clone();
        assert!(stored.reconcile(view.page));
        assert_eq!(stored.page(), 1);
        assert_eq!(derive_view(&games, &params).page, 3);
    }

    #[test]
    fn empty_collection_yields_one_empty_page() {
        let view = derive_view(&[], &QueryParams::default());
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page, 1);
        assert!(view.page_items().is_empty());
    }

    #[test]
    fn count_matches_ignores_page() {
        let games = numbered(13);
        let params = QueryParams::default().with_page(nz(40));
        assert_eq!(count_matches(&games, &params), 13);
        assert_eq!(pages_for(&games, &params).get(), 2);
    }

    #[test]
    fn pipeline_does_not_touch_the_snapshot() {
        let games = numbered(6);
        let before = games.clone();
        let mut params = QueryParams::default();
        params.set_sort_key(SortKey::TitleDesc);
        let _ = derive_view(&games, &params);
        assert_eq!(games, before);
    }

    fn arb_game() -> impl Strategy<Value = Game> {
        (
            "[a-zA-Z ]{0,12}",
            prop::sample::select(vec!["PC", "Xbox", "PlayStation 5"]),
            prop::sample::select(vec!["RPG", "Acción", "Puzzle"]),
            prop::option::of(prop::sample::select(GameStatus::all().to_vec())),
            0u8..=5,
            0i32..=2030,
            0u32..500,
        )
            .prop_map(|(title, platform, genre, status, rating, year, hours)| Game {
                title,
                platform: platform.into(),
                genre: genre.into(),
                status,
                rating,
                release_year: year,
                hours_played: f64::from(hours) / 4.0,
                ..Game::default()
            })
    }

    fn arb_games() -> impl Strategy<Value = Vec<Game>> {
        prop::collection::vec(arb_game(), 0..40).prop_map(|mut games| {
            for (i, game) in games.iter_mut().enumerate() {
                game.id = GameId::new(format!("id-{i}"));
            }
            games
        })
    }

    fn arb_params() -> impl Strategy<Value = QueryParams> {
        (
            prop::sample::select(vec!["", "a", " E ", "zz"]),
            prop::option::of(prop::sample::select(vec!["PC", "Xbox"])),
            prop::option::of(prop::sample::select(GameStatus::all().to_vec())),
            prop::sample::select(SortKey::all().to_vec()),
            1usize..8,
            1usize..12,
        )
            .prop_map(|(search, platform, status, sort, size, page)| {
                let mut params = QueryParams::new(nz(size));
                params.set_search_text(search);
                params.set_platform_filter(
                    platform.map_or(Filter::All, |p| Filter::Only(p.to_string())),
                );
                params.set_status_filter(status.map_or(Filter::All, Filter::Only));
                params.set_sort_key(sort);
                params.with_page(nz(page))
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn page_never_exceeds_page_size(games in arb_games(), params in arb_params()) {
            let view = derive_view(&games, &params);
            prop_assert!(view.page_items().len() <= params.page_size().get());
            prop_assert!(view.page >= 1 && view.page <= view.total_pages);

            let size = params.page_size().get();
            let before = (view.page - 1) * size;
            let expected = size.min(view.total_count.saturating_sub(before));
            prop_assert_eq!(view.page_items().len(), expected);
        }

        #[test]
        fn total_pages_matches_count(games in arb_games(), params in arb_params()) {
            let view = derive_view(&games, &params);
            let size = params.page_size().get();
            prop_assert_eq!(view.total_pages, view.total_count.div_ceil(size).max(1));
            prop_assert_eq!(view.total_count, count_matches(&games, &params));
        }

        #[test]
        fn every_visible_game_satisfies_the_query(games in arb_games(), params in arb_params()) {
            let view = derive_view(&games, &params);
            let needle = params.search_text().trim().to_lowercase();
            for game in &view.filtered_sorted {
                prop_assert!(params.admits(game));
                prop_assert!(game.title.to_lowercase().contains(&needle));
            }
        }

        #[test]
        fn pages_partition_the_result(games in arb_games(), params in arb_params()) {
            let first = derive_view(&games, &params.clone().with_page(NonZeroUsize::MIN));
            let mut stitched = Vec::new();
            for page in 1..=first.total_pages {
                let view = derive_view(&games, &params.clone().with_page(nz(page)));
                stitched.extend_from_slice(view.page_items());
            }
            prop_assert_eq!(stitched, first.filtered_sorted);
        }

        #[test]
        fn unsorted_view_keeps_collection_order(games in arb_games(), params in arb_params()) {
            let mut params = params;
            params.set_sort_key(SortKey::None);
            let view = derive_view(&games, &params);
            let positions: Vec<usize> = view
                .filtered_sorted
                .iter()
                .filter_map(|g| games.iter().position(|o| o.id == g.id))
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn deriving_twice_is_stable(games in arb_games(), params in arb_params()) {
            let view = derive_view(&games, &params);
            let again = derive_view(&view.filtered_sorted, &params);
            prop_assert_eq!(again.filtered_sorted, view.filtered_sorted);
        }

        #[test]
        fn default_params_keep_everything_in_order(games in arb_games()) {
            let view = derive_view(&games, &QueryParams::default());
            prop_assert_eq!(view.filtered_sorted, games);
        }

        #[test]
        fn platform_and_genre_filters_commute(
            games in arb_games(),
            platform in prop::sample::select(vec!["PC", "Xbox"]),
            genre in prop::sample::select(vec!["RPG", "Puzzle"]),
        ) {
            let mut only_platform = QueryParams::default();
            only_platform.set_platform_filter(Filter::Only(platform.to_string()));
            let mut only_genre = QueryParams::default();
            only_genre.set_genre_filter(Filter::Only(genre.to_string()));

            let platform_then_genre = derive_view(
                &derive_view(&games, &only_platform).filtered_sorted,
                &only_genre,
            )
            .filtered_sorted;
            let genre_then_platform = derive_view(
                &derive_view(&games, &only_genre).filtered_sorted,
                &only_platform,
            )
            .filtered_sorted;
            prop_assert_eq!(&platform_then_genre, &genre_then_platform);

            let mut both = only_platform.clone();
            both.set_genre_filter(Filter::Only(genre.to_string()));
            prop_assert_eq!(derive_view(&games, &both).filtered_sorted, platform_then_genre);
        }
    }
}
