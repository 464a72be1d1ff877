use serde::{Deserialize, Serialize};

/// Stable identifier of a movie in the catalog
pub type MovieId = i64;

/// Stable identifier of a user
pub type UserId = i64;

/// Lower bound of the rating scale
pub const RATING_MIN: f32 = 0.0;

/// Upper bound of the rating scale
pub const RATING_MAX: f32 = 5.0;

/// A movie in the catalog.
///
/// Identity (`id`) is assigned at ingestion and never changes. Metadata and
/// `popularity` may be replaced wholesale by a later update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Ordered category labels, may be empty
    pub genres: Vec<String>,
    /// Free-text synopsis, may be empty
    pub overview: String,
    pub year: Option<i32>,
    /// Non-negative popularity signal used for cold-start ranking
    pub popularity: f32,
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// A rating a user gave a movie.
///
/// Unique per `(user_id, movie_id)`; a second submission for the same pair
/// overwrites the value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
}

impl Rating {
    /// Whether the value lies inside the closed rating scale
    pub fn is_in_range(value: f32) -> bool {
        (RATING_MIN..=RATING_MAX).contains(&value)
    }
}
