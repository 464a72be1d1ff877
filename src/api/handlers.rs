use std::collections::{HashMap, HashSet};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::engine::{build_profile, recommend as rank_candidates};
use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieId, Rating, User, UserId};
use crate::store::MovieDraft;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub overview: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub popularity: f32,
}

impl From<MovieRequest> for MovieDraft {
    fn from(request: MovieRequest) -> Self {
        Self {
            title: request.title,
            genres: request.genres,
            overview: request.overview,
            year: request.year,
            popularity: request.popularity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub year: Option<i32>,
    pub popularity: f32,
}

impl From<&Movie> for MovieResponse {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            overview: movie.overview.clone(),
            year: movie.year,
            popularity: movie.popularity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub movie_id: MovieId,
    pub rating: f32,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
}

impl From<&Rating> for RatingResponse {
    fn from(rating: &Rating) -> Self {
        Self {
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            rating: rating.rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_page_limit")]
    pub limit: usize,
}

fn default_page_limit() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub movie: MovieResponse,
    pub score: f32,
}

// Handlers

/// List one page of the catalog, ordered by ascending id
pub async fn list_movies(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Json<Vec<MovieResponse>> {
    let store = state.store.read().await;
    let movies: Vec<MovieResponse> = store
        .movies_page(page.skip, page.limit)
        .iter()
        .map(MovieResponse::from)
        .collect();
    Json(movies)
}

/// Ingest a movie and rebuild the corpus index before responding
pub async fn create_movie(
    State(state): State<AppState>,
    Json(request): Json<MovieRequest>,
) -> (StatusCode, Json<MovieResponse>) {
    let movie = {
        let mut store = state.store.write().await;
        store.insert_movie(request.into())
    };
    state.rebuild_index().await;

    (StatusCode::CREATED, Json(MovieResponse::from(&movie)))
}

/// Replace a movie's metadata and popularity; identity is immutable
pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    Json(request): Json<MovieRequest>,
) -> AppResult<Json<MovieResponse>> {
    let updated = {
        let mut store = state.store.write().await;
        store.update_movie(movie_id, request.into())
    };
    let movie = updated.ok_or_else(|| AppError::NotFound(format!("Movie {movie_id} not found")))?;
    state.rebuild_index().await;

    Ok(Json(MovieResponse::from(&movie)))
}

/// Remove a movie; its ratings go with it
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<StatusCode> {
    let removed = {
        let mut store = state.store.write().await;
        store.remove_movie(movie_id)
    };
    if !removed {
        return Err(AppError::NotFound(format!("Movie {movie_id} not found")));
    }
    state.rebuild_index().await;

    Ok(StatusCode::NO_CONTENT)
}

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    let store = state.store.read().await;
    let users: Vec<UserResponse> = store.all_users().iter().map(UserResponse::from).collect();
    Json(users)
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> (StatusCode, Json<UserResponse>) {
    let user = {
        let mut store = state.store.write().await;
        store.insert_user(request.name)
    };
    (StatusCode::CREATED, Json(UserResponse::from(&user)))
}

/// List a user's ratings, ordered by movie id
pub async fn get_ratings(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<RatingResponse>>> {
    let store = state.store.read().await;
    if store.user(user_id).is_none() {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    let ratings: Vec<RatingResponse> = store
        .ratings_for_user(user_id)
        .iter()
        .map(RatingResponse::from)
        .collect();
    Ok(Json(ratings))
}

/// Insert or overwrite the rating for `(user_id, movie_id)`.
///
/// Ratings never trigger an index rebuild: document frequencies depend only
/// on the catalog.
pub async fn upsert_rating(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<RatingRequest>,
) -> AppResult<Json<RatingResponse>> {
    if !Rating::is_in_range(request.rating) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between 0.0 and 5.0 (got {})",
            request.rating
        )));
    }

    let mut store = state.store.write().await;
    if store.user(user_id).is_none() || store.movie(request.movie_id).is_none() {
        return Err(AppError::NotFound("User or movie not found".to_string()));
    }
    let rating = store.upsert_rating(user_id, request.movie_id, request.rating);

    Ok(Json(RatingResponse::from(&rating)))
}

/// Top recommendations for a user.
///
/// Builds the user's taste profile from their ratings against the current
/// index snapshot and ranks every unrated movie. An empty catalog yields an
/// empty list, not an error.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let limit = params.limit.unwrap_or(state.config.default_limit);
    if limit == 0 {
        return Err(AppError::InvalidInput(
            "limit must be a positive integer".to_string(),
        ));
    }

    // Snapshot everything the engine needs, then compute without locks
    let index = state.index_snapshot().await;
    let (ratings, movies) = {
        let store = state.store.read().await;
        if store.user(params.user_id).is_none() {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                params.user_id
            )));
        }
        (store.ratings_for_user(params.user_id), store.all_movies())
    };

    let profile = build_profile(&ratings, &index);
    let rated: HashSet<MovieId> = ratings.iter().map(|r| r.movie_id).collect();
    let ranked = rank_candidates(&profile, &rated, &movies, &index, limit);

    let by_id: HashMap<MovieId, &Movie> = movies.iter().map(|m| (m.id, m)).collect();
    let recommendations: Vec<RecommendationResponse> = ranked
        .into_iter()
        .filter_map(|scored| {
            by_id.get(&scored.movie_id).map(|movie| RecommendationResponse {
                movie: MovieResponse::from(*movie),
                score: scored.score,
            })
        })
        .collect();

    Ok(Json(recommendations))
}
