//! Text-in, draft-out boundary for the add/edit and review forms.
//!
//! Every field is held exactly as typed. Numbers are only coerced, and the
//! whole form validated, when a [`GameDraft`] is requested, so the backend
//! never receives `"5"` where it expects `5`.

use chrono::Datelike;
use gameshelf_model::{
    DEFAULT_GENRE, DEFAULT_PLATFORM, Game, GameDraft, GameId, GameStatus, ReviewDraft,
};
use std::fmt;
use thiserror::Error;
use url::Url;

pub const MIN_RELEASE_YEAR: i32 = 1970;
/// Announced titles may carry a release year a little ahead of today.
pub const MAX_YEARS_AHEAD: i32 = 2;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    Platform,
    Genre,
    ReleaseYear,
    ImageUrl,
    Status,
    Rating,
    HoursPlayed,
    Game,
    ReviewText,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Description => "description",
            FormField::Platform => "platform",
            FormField::Genre => "genre",
            FormField::ReleaseYear => "release year",
            FormField::ImageUrl => "image URL",
            FormField::Status => "status",
            FormField::Rating => "rating",
            FormField::HoursPlayed => "hours played",
            FormField::Game => "game",
            FormField::ReviewText => "review text",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FormField,
    pub problem: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

/// All problems found in one pass over the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {subject}: {}", summarize(.issues))]
pub struct FormError {
    /// What was being entered: "game" or "review".
    pub subject: &'static str,
    pub issues: Vec<FieldIssue>,
}

impl FormError {
    pub fn has_issue(&self, field: FormField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(FieldIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Add/edit form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameForm {
    pub title: String,
    pub description: String,
    pub platform: String,
    pub genre: String,
    pub release_year: String,
    pub image_url: String,
    pub status: String,
    pub rating: String,
    pub hours_played: String,
}

impl Default for GameForm {
    fn default() -> Self {
        Self::new_at(current_year())
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl GameForm {
    /// Empty form with the usual defaults, dated `year`.
    pub fn new_at(year: i32) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            platform: DEFAULT_PLATFORM.to_string(),
            genre: DEFAULT_GENRE.to_string(),
            release_year: year.to_string(),
            image_url: String::new(),
            status: GameStatus::default().api_name().to_string(),
            rating: "0".to_string(),
            hours_played: "0".to_string(),
        }
    }

    /// Pre-fill an edit form from a stored game. Unknown statuses fall back
    /// to the default so the form stays submittable.
    pub fn from_game(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            description: game.description.clone(),
            platform: game.platform.clone(),
            genre: game.genre.clone(),
            release_year: game.release_year.to_string(),
            image_url: game.image_url.clone().unwrap_or_default(),
            status: game.status.unwrap_or_default().api_name().to_string(),
            rating: game.rating.to_string(),
            hours_played: game.hours_played.to_string(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn into_draft(self) -> Result<GameDraft, FormError> {
        self.validate_at(current_year())
    }

    /// Coerce and validate against a fixed "now".
    pub fn validate_at(&self, current_year: i32) -> Result<GameDraft, FormError> {
        let mut issues = Vec::new();
        let mut flag = |field, problem: &str| {
            issues.push(FieldIssue {
                field,
                problem: problem.to_string(),
            })
        };

        let title = self.title.trim();
        if title.is_empty() {
            flag(FormField::Title, "is required");
        }
        let description = self.description.trim();
        if description.is_empty() {
            flag(FormField::Description, "is required");
        }
        let platform = self.platform.trim();
        if platform.is_empty() {
            flag(FormField::Platform, "is required");
        }
        let genre = self.genre.trim();
        if genre.is_empty() {
            flag(FormField::Genre, "is required");
        }

        let latest_year = current_year + MAX_YEARS_AHEAD;
        let release_year = match self.release_year.trim().parse::<i32>() {
            Ok(year) if (MIN_RELEASE_YEAR..=latest_year).contains(&year) => year,
            Ok(_) => {
                flag(
                    FormField::ReleaseYear,
                    &format!("must be between {MIN_RELEASE_YEAR} and {latest_year}"),
                );
                0
            }
            Err(_) => {
                flag(FormField::ReleaseYear, "must be a whole number");
                0
            }
        };

        let rating = match parse_or_zero::<u8>(&self.rating) {
            Some(rating) if rating <= MAX_RATING => rating,
            _ => {
                flag(
                    FormField::Rating,
                    &format!("must be a whole number from 0 to {MAX_RATING}"),
                );
                0
            }
        };

        let hours_played = match parse_or_zero::<f64>(&self.hours_played) {
            Some(hours) if hours.is_finite() && hours >= 0.0 => hours,
            _ => {
                flag(FormField::HoursPlayed, "must be zero or a positive number");
                0.0
            }
        };

        let image_url = self.image_url.trim();
        let image_url = if image_url.is_empty() {
            None
        } else if Url::parse(image_url).is_ok_and(|url| !url.cannot_be_a_base()) {
            Some(image_url.to_string())
        } else {
            flag(FormField::ImageUrl, "must be an absolute URL");
            None
        };

        let status = match self.status.trim().parse::<GameStatus>() {
            Ok(status) => status,
            Err(_) => {
                flag(FormField::Status, "must be one of Por jugar, Jugando, Completado, Abandonado");
                GameStatus::default()
            }
        };

        if !issues.is_empty() {
            return Err(FormError {
                subject: "game",
                issues,
            });
        }

        Ok(GameDraft {
            title: title.to_string(),
            description: description.to_string(),
            platform: platform.to_string(),
            genre: genre.to_string(),
            release_year,
            image_url,
            status,
            rating,
            hours_played,
        })
    }
}

/// Review entry form, held as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub game_id: String,
    pub author: String,
    pub rating: String,
    pub text: String,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ReviewDraft, FormError> {
        let mut issues = Vec::new();
        let mut flag = |field, problem: String| issues.push(FieldIssue { field, problem });

        let game_id = GameId::new(self.game_id.trim());
        if game_id.is_blank() {
            flag(FormField::Game, "is required".to_string());
        }
        let text = self.text.trim();
        if text.is_empty() {
            flag(FormField::ReviewText, "is required".to_string());
        }
        let rating = match parse_or_zero::<u8>(&self.rating) {
            Some(rating) if rating <= MAX_RATING => rating,
            _ => {
                flag(
                    FormField::Rating,
                    format!("must be a whole number from 0 to {MAX_RATING}"),
                );
                0
            }
        };

        if !issues.is_empty() {
            return Err(FormError {
                subject: "review",
                issues,
            });
        }

        let author = self.author.trim();
        Ok(ReviewDraft {
            game_id,
            author: (!author.is_empty()).then(|| author.to_string()),
            rating,
            text: text.to_string(),
        })
    }
}

/// Blank number fields count as zero.
fn parse_or_zero<T: std::str::FromStr + Default>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        Some(T::default())
    } else {
        raw.parse().ok()
    }
}
