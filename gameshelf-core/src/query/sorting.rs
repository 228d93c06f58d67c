//! Sort stage of the query pipeline.
//!
//! All sorts are stable: games that compare equal keep the order they had
//! after filtering.

use super::types::SortKey;
use gameshelf_model::Game;
use ordered_float::OrderedFloat;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Compare two games under `key`. `SortKey::None` treats everything as equal.
pub fn compare_games(a: &Game, b: &Game, key: SortKey) -> Ordering {
    match key {
        SortKey::None => Ordering::Equal,
        SortKey::TitleAsc => compare_titles(&a.title, &b.title),
        SortKey::TitleDesc => compare_titles(&b.title, &a.title),
        SortKey::HoursDesc => OrderedFloat(b.hours_played).cmp(&OrderedFloat(a.hours_played)),
        SortKey::RatingDesc => b.rating.cmp(&a.rating),
        SortKey::YearDesc => b.release_year.cmp(&a.release_year),
    }
}

/// Stable in-place sort. `SortKey::None` leaves the slice untouched.
pub fn sort_games<G: Borrow<Game>>(games: &mut [G], key: SortKey) {
    if key == SortKey::None {
        return;
    }
    games.sort_by(|a, b| compare_games(a.borrow(), b.borrow(), key));
}

/// Title collation close to a human dictionary order.
///
/// Three levels, each consulted only on a tie in the previous one:
/// 1. letters with accents and case folded away ("Édith" ~ "edith"),
/// 2. accents, case still folded ("edith" < "édith"),
/// 3. case, lowercase first ("edith" < "Edith"), then raw code points.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    folded(&a_lower)
        .cmp(folded(&b_lower))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| a.chars().map(lowercase_first).cmp(b.chars().map(lowercase_first)))
        .then_with(|| a.cmp(b))
}

fn lowercase_first(c: char) -> (bool, char) {
    (c.is_uppercase(), c)
}

fn folded(lower: &str) -> impl Iterator<Item = char> + '_ {
    lower.chars().flat_map(|c| {
        let (first, second) = fold_letter(c);
        std::iter::once(first).chain(second)
    })
}

/// Base letter(s) for a lowercase Latin letter.
///
/// Covers the accented letters of the Latin-1 Supplement and Latin
/// Extended-A blocks. `æ`, `œ`, `ß` and `þ` expand to two letters. Anything
/// else, including other scripts, compares as itself.
fn fold_letter(c: char) -> (char, Option<char>) {
    let base = match c {
        'æ' => return ('a', Some('e')),
        'œ' => return ('o', Some('e')),
        'ß' => return ('s', Some('s')),
        'þ' => return ('t', Some('h')),
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' | 'ð' => 'd',
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'í' | 'ì' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' | 'ș' => 's',
        'ţ' | 'ť' | 'ŧ' | 'ț' => 't',
        'ú' | 'ù' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    };
    (base, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameshelf_model::GameId;

    fn titled(id: &str, title: &str) -> Game {
        Game {
            id: GameId::new(id),
            title: title.into(),
            ..Game::default()
        }
    }

    fn ids(games: &[Game]) -> Vec<&str> {
        games.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn title_sort_ignores_case_and_accents_at_first_level() {
        let mut games = vec![
            titled("1", "zelda"),
            titled("2", "Ábaco"),
            titled("3", "Celeste"),
            titled("4", "apex"),
        ];
        sort_games(&mut games, SortKey::TitleAsc);
        assert_eq!(ids(&games), vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn ligatures_and_extended_latin_fold_to_base_letters() {
        let mut games = vec![
            titled("1", "Ogre"),
            titled("2", "Œuvre"),
            titled("3", "Odin"),
            titled("4", "Lose"),
            titled("5", "Łódź"),
            titled("6", "Lobo"),
            titled("7", "Strata"),
            titled("8", "Straße"),
            titled("9", "Strass"),
        ];
        sort_games(&mut games, SortKey::TitleAsc);
        assert_eq!(ids(&games), vec!["6", "5", "4", "3", "2", "1", "9", "8", "7"]);

        // Equal at the first level, so the folded spelling comes first.
        assert_eq!(compare_titles("Oeuvre", "Œuvre"), Ordering::Less);
        assert_eq!(compare_titles("strasse", "straße"), Ordering::Less);
    }

    #[test]
    fn title_desc_is_the_reverse_of_title_asc() {
        let mut asc = vec![
            titled("1", "Halo"),
            titled("2", "halo"),
            titled("3", "Hálo"),
            titled("4", "Doom"),
            titled("5", ""),
        ];
        let mut desc = asc.clone();
        sort_games(&mut asc, SortKey::TitleAsc);
        sort_games(&mut desc, SortKey::TitleDesc);

        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
        assert_eq!(asc[0].title, "");
    }

    #[test]
    fn numeric_sorts_are_descending_and_stable() {
        let mut games = vec![
            Game { rating: 3, ..titled("a", "A") },
            Game { rating: 5, ..titled("b", "B") },
            Game { rating: 3, ..titled("c", "C") },
            Game { rating: 0, ..titled("d", "D") },
        ];
        sort_games(&mut games, SortKey::RatingDesc);
        assert_eq!(ids(&games), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn hours_sort_handles_fractions() {
        let mut games = vec![
            Game { hours_played: 1.5, ..titled("a", "A") },
            Game { hours_played: 10.0, ..titled("b", "B") },
            Game { hours_played: 1.75, ..titled("c", "C") },
        ];
        sort_games(&mut games, SortKey::HoursDesc);
        assert_eq!(ids(&games), vec!["b", "c", "a"]);
    }

    #[test]
    fn year_sort_puts_missing_years_last() {
        let mut games = vec![
            Game { release_year: 0, ..titled("a", "A") },
            Game { release_year: 2017, ..titled("b", "B") },
            Game { release_year: 1998, ..titled("c", "C") },
        ];
        sort_games(&mut games, SortKey::YearDesc);
        assert_eq!(ids(&games), vec!["b", "c", "a"]);
    }

    #[test]
    fn none_keeps_collection_order() {
        let mut games = vec![titled("z", "Zelda"), titled("a", "Astro")];
        sort_games(&mut games, SortKey::None);
        assert_eq!(ids(&games), vec!["z", "a"]);
    }
}
