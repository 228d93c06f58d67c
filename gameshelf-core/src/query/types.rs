use gameshelf_model::{Game, GameStatus};
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(12) {
    Some(size) => size,
    None => unreachable!(),
};

/// Sentinel the presentation layer uses for "no filter".
pub const ALL_SENTINEL: &str = "All";

/// Filter selection for one field: either everything, or exact matches on
/// a single value.
///
/// On the wire the unfiltered state is the string `"All"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }

    /// `true` when `candidate` passes the filter. A missing value only passes
    /// the unfiltered state.
    pub fn admits(&self, candidate: Option<&T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(wanted) => candidate == Some(wanted),
        }
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            Filter::All => None,
            Filter::Only(value) => Some(value),
        }
    }
}

impl Filter<String> {
    /// Build a string filter, mapping the `"All"` sentinel to [`Filter::All`].
    pub fn from_selection(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw == ALL_SENTINEL {
            Filter::All
        } else {
            Filter::Only(raw)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str(ALL_SENTINEL),
            Filter::Only(value) => write!(f, "{value}"),
        }
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_SENTINEL {
            Ok(Filter::All)
        } else {
            s.parse().map(Filter::Only)
        }
    }
}

impl<T: Serialize> Serialize for Filter<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Filter::All => serializer.serialize_str(ALL_SENTINEL),
            Filter::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Filter<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_str() == Some(ALL_SENTINEL) {
            return Ok(Filter::All);
        }
        serde_json::from_value(value)
            .map(Filter::Only)
            .map_err(D::Error::custom)
    }
}

/// Ordering applied after search and filters. At most one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Keep the order the backend returned.
    #[default]
    None,
    TitleAsc,
    TitleDesc,
    HoursDesc,
    RatingDesc,
    YearDesc,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        use SortKey::*;
        &[None, TitleAsc, TitleDesc, HoursDesc, RatingDesc, YearDesc]
    }

    pub fn api_name(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::TitleAsc => "titleAsc",
            SortKey::TitleDesc => "titleDesc",
            SortKey::HoursDesc => "hoursDesc",
            SortKey::RatingDesc => "ratingDesc",
            SortKey::YearDesc => "yearDesc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Default order",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::HoursDesc => "Most played",
            SortKey::RatingDesc => "Highest rated",
            SortKey::YearDesc => "Newest first",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key '{}' (expected one of: {})",
            self.0,
            SortKey::all()
                .iter()
                .map(SortKey::api_name)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.api_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Everything the presentation layer controls about the current view.
///
/// Each transition except [`set_page`](Self::set_page) puts the user back on
/// page 1, even when the new value equals the old one, so a narrower result
/// set can never strand them on a page that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    search_text: String,
    platform_filter: Filter<String>,
    genre_filter: Filter<String>,
    status_filter: Filter<GameStatus>,
    sort_key: SortKey,
    page: NonZeroUsize,
    page_size: NonZeroUsize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryParams {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            search_text: String::new(),
            platform_filter: Filter::All,
            genre_filter: Filter::All,
            status_filter: Filter::All,
            sort_key: SortKey::None,
            page: NonZeroUsize::MIN,
            page_size,
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn platform_filter(&self) -> &Filter<String> {
        &self.platform_filter
    }

    pub fn genre_filter(&self) -> &Filter<String> {
        &self.genre_filter
    }

    pub fn status_filter(&self) -> &Filter<GameStatus> {
        &self.status_filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.reset_page();
    }

    pub fn set_platform_filter(&mut self, filter: Filter<String>) {
        self.platform_filter = filter;
        self.reset_page();
    }

    pub fn set_genre_filter(&mut self, filter: Filter<String>) {
        self.genre_filter = filter;
        self.reset_page();
    }

    pub fn set_status_filter(&mut self, filter: Filter<GameStatus>) {
        self.status_filter = filter;
        self.reset_page();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.reset_page();
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.reset_page();
    }

    /// Move to page `requested`, clamped into `[1, total_pages]`.
    ///
    /// `total_pages` must come from a view derived with the current
    /// parameters; the page itself does not influence it. Returns the page
    /// actually selected.
    pub fn set_page(&mut self, requested: usize, total_pages: NonZeroUsize) -> usize {
        let clamped = requested.clamp(1, total_pages.get());
        self.page = NonZeroUsize::new(clamped).unwrap_or(NonZeroUsize::MIN);
        clamped
    }

    /// Restore defaults for search, filters and sort, keeping the page size.
    pub fn reset_filters(&mut self) {
        *self = Self::new(self.page_size);
    }

    /// Builder-style page override with no bounds check. Used when restoring
    /// persisted parameters; [`derive_view`](super::pipeline::derive_view)
    /// clamps anything out of range.
    pub fn with_page(mut self, page: NonZeroUsize) -> Self {
        self.page = page;
        self
    }

    /// Write back the page a derived view actually rendered. Returns `true`
    /// when the stored page had to change.
    pub fn reconcile(&mut self, effective_page: usize) -> bool {
        match NonZeroUsize::new(effective_page) {
            Some(page) if page != self.page => {
                self.page = page;
                true
            }
            _ => false,
        }
    }

    /// Platform, genre and status filters combined with AND.
    pub fn admits(&self, game: &Game) -> bool {
        self.platform_filter.admits(Some(&game.platform))
            && self.genre_filter.admits(Some(&game.genre))
            && self.status_filter.admits(game.status.as_ref())
    }

    fn reset_page(&mut self) {
        self.page = NonZeroUsize::MIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn on_page_three() -> QueryParams {
        let mut params = QueryParams::default();
        params.set_page(3, nz(5));
        assert_eq!(params.page(), 3);
        params
    }

    #[test]
    fn defaults_match_the_unfiltered_view() {
        let params = QueryParams::default();
        assert_eq!(params.search_text(), "");
        assert!(params.platform_filter().is_all());
        assert!(params.genre_filter().is_all());
        assert!(params.status_filter().is_all());
        assert_eq!(params.sort_key(), SortKey::None);
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn every_transition_but_set_page_resets_to_first_page() {
        let transitions: Vec<fn(&mut QueryParams)> = vec![
            |p| p.set_search_text("zelda"),
            |p| p.set_platform_filter(Filter::Only("PC".into())),
            |p| p.set_genre_filter(Filter::Only("RPG".into())),
            |p| p.set_status_filter(Filter::Only(GameStatus::Playing)),
            |p| p.set_sort_key(SortKey::YearDesc),
            |p| p.set_page_size(nz(24)),
            |p| p.reset_filters(),
        ];

        for transition in transitions {
            let mut params = on_page_three();
            transition(&mut params);
            assert_eq!(params.page(), 1);
        }
    }

    #[test]
    fn setting_the_same_value_still_resets_page() {
        let mut params = on_page_three();
        params.set_search_text("");
        assert_eq!(params.page(), 1);

        let mut params = on_page_three();
        params.set_sort_key(SortKey::None);
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn set_page_clamps_into_range() {
        let mut params = QueryParams::default();
        assert_eq!(params.set_page(0, nz(4)), 1);
        assert_eq!(params.set_page(9, nz(4)), 4);
        assert_eq!(params.set_page(2, nz(4)), 2);
        assert_eq!(params.page(), 2);
    }

    #[test]
    fn reset_filters_keeps_page_size() {
        let mut params = QueryParams::new(nz(5));
        params.set_search_text("halo");
        params.set_status_filter(Filter::Only(GameStatus::Completed));
        params.reset_filters();
        assert_eq!(params, QueryParams::new(nz(5)));
    }

    #[test]
    fn filter_uses_all_sentinel_on_the_wire() {
        let params = QueryParams::default();
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["platformFilter"], "All");
        assert_eq!(value["statusFilter"], "All");
        assert_eq!(value["sortKey"], "none");

        let mut narrowed = params.clone();
        narrowed.set_status_filter(Filter::Only(GameStatus::Completed));
        narrowed.set_genre_filter(Filter::Only("RPG".into()));
        let json = serde_json::to_string(&narrowed).unwrap();
        let back: QueryParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, narrowed);
    }

    #[test]
    fn zero_page_size_is_rejected_on_deserialize() {
        let mut value = serde_json::to_value(QueryParams::default()).unwrap();
        value["pageSize"] = serde_json::json!(0);
        assert!(serde_json::from_value::<QueryParams>(value).is_err());
    }

    #[test]
    fn parses_filters_and_sort_keys() {
        assert_eq!("All".parse::<Filter<GameStatus>>(), Ok(Filter::All));
        assert_eq!(
            "Jugando".parse::<Filter<GameStatus>>(),
            Ok(Filter::Only(GameStatus::Playing))
        );
        assert_eq!(Filter::from_selection("All"), Filter::<String>::All);
        assert_eq!("ratingDesc".parse::<SortKey>(), Ok(SortKey::RatingDesc));
        assert_eq!("titledesc".parse::<SortKey>(), Ok(SortKey::TitleDesc));
        assert!("alphabetical".parse::<SortKey>().is_err());
    }

    #[test]
    fn status_filter_never_admits_missing_status() {
        let filter = Filter::Only(GameStatus::Backlog);
        assert!(!filter.admits(None));
        assert!(Filter::<GameStatus>::All.admits(None));
    }
}
