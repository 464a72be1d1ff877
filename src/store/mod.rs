//! In-memory catalog store.
//!
//! Owns the movie catalog, the user list, and all ratings. Everything the
//! engine consumes is materialized here before a request reaches it; there is
//! no external database behind this store.

use std::collections::HashMap;

use crate::models::{Movie, MovieId, Rating, User, UserId};

/// Fields of a movie that callers supply; the store assigns the id.
#[derive(Debug, Clone)]
pub struct MovieDraft {
    pub title: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub year: Option<i32>,
    pub popularity: f32,
}

/// Catalog, users, and ratings held in memory.
///
/// Ratings are keyed by `(user_id, movie_id)`: inserting an existing key
/// overwrites the value, which is exactly the upsert contract. Removing a
/// movie removes its ratings with it.
#[derive(Debug, Default)]
pub struct CatalogStore {
    movies: HashMap<MovieId, Movie>,
    users: HashMap<UserId, User>,
    ratings: HashMap<(UserId, MovieId), f32>,
    next_movie_id: MovieId,
    next_user_id: UserId,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a movie under a fresh id
    pub fn insert_movie(&mut self, draft: MovieDraft) -> Movie {
        self.next_movie_id += 1;
        let movie = Movie {
            id: self.next_movie_id,
            title: draft.title,
            genres: draft.genres,
            overview: draft.overview,
            year: draft.year,
            popularity: draft.popularity.max(0.0),
        };
        self.movies.insert(movie.id, movie.clone());
        movie
    }

    /// Replace a movie's metadata and popularity, keeping its identity.
    /// Returns `None` if the movie does not exist.
    pub fn update_movie(&mut self, id: MovieId, draft: MovieDraft) -> Option<Movie> {
        let movie = self.movies.get_mut(&id)?;
        movie.title = draft.title;
        movie.genres = draft.genres;
        movie.overview = draft.overview;
        movie.year = draft.year;
        movie.popularity = draft.popularity.max(0.0);
        Some(movie.clone())
    }

    /// Remove a movie and every rating that references it
    pub fn remove_movie(&mut self, id: MovieId) -> bool {
        if self.movies.remove(&id).is_none() {
            return false;
        }
        self.ratings.retain(|&(_, movie_id), _| movie_id != id);
        true
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Whole catalog ordered by ascending id
    pub fn all_movies(&self) -> Vec<Movie> {
        let mut movies: Vec<Movie> = self.movies.values().cloned().collect();
        movies.sort_by_key(|m| m.id);
        movies
    }

    /// One page of the catalog, ordered by ascending id
    pub fn movies_page(&self, skip: usize, limit: usize) -> Vec<Movie> {
        self.all_movies().into_iter().skip(skip).take(limit).collect()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn insert_user(&mut self, name: String) -> User {
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            name,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// All users ordered by ascending id
    pub fn all_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Insert or overwrite the rating for `(user_id, movie_id)`.
    ///
    /// Callers must have validated that both parents exist and that the value
    /// is inside the rating scale.
    pub fn upsert_rating(&mut self, user_id: UserId, movie_id: MovieId, value: f32) -> Rating {
        self.ratings.insert((user_id, movie_id), value);
        Rating {
            user_id,
            movie_id,
            rating: value,
        }
    }

    /// A user's ratings ordered by ascending movie id
    pub fn ratings_for_user(&self, user_id: UserId) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = self
            .ratings
            .iter()
            .filter(|((uid, _), _)| *uid == user_id)
            .map(|(&(user_id, movie_id), &rating)| Rating {
                user_id,
                movie_id,
                rating,
            })
            .collect();
        ratings.sort_by_key(|r| r.movie_id);
        ratings
    }
}
