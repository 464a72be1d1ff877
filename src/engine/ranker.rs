//! Candidate scoring and ranking.
//!
//! Scores every unrated movie against the user's profile (cosine similarity,
//! both sides unit-normalized) or, when the profile is empty, falls back to
//! raw popularity. Ordering is a total order (score, then popularity, then
//! id), so identical inputs always produce the identical sequence.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::engine::index::CorpusIndex;
use crate::engine::profile::UserProfile;
use crate::models::{Movie, MovieId};

/// One ranked entry: a candidate movie and its score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie_id: MovieId,
    pub score: f32,
}

/// `recommend(profile, rated, movies, index, limit)`
///
/// Candidates are all movies the user has not rated, visited in ascending id
/// order. Warm path: score = profile · vector, ties broken by descending
/// popularity then ascending id. Cold path (empty profile, or every warm
/// score exactly zero): score = popularity, ties by ascending id. A limit
/// beyond the candidate count returns the full candidate list.
pub fn recommend(
    profile: &UserProfile,
    rated: &HashSet<MovieId>,
    movies: &[Movie],
    index: &CorpusIndex,
    limit: usize,
) -> Vec<ScoredMovie> {
    let mut candidates: Vec<&Movie> = movies.iter().filter(|m| !rated.contains(&m.id)).collect();
    candidates.sort_by_key(|m| m.id);

    if candidates.is_empty() {
        return Vec::new();
    }

    let warm = if profile.is_empty() {
        None
    } else {
        let scored: Vec<(f32, &Movie)> = candidates
            .iter()
            .map(|m| {
                let score = index
                    .vector_of(m.id)
                    .map_or(0.0, |v| profile.vector().dot(v));
                (score, *m)
            })
            .collect();
        // A warm pass where nothing scored is no better than no profile at
        // all; fall through to the popularity path.
        if scored.iter().all(|(score, _)| *score == 0.0) {
            None
        } else {
            Some(scored)
        }
    };

    let mut ranked: Vec<ScoredMovie> = match warm {
        Some(mut scored) => {
            debug!(candidates = scored.len(), path = "warm", "ranking candidates");
            scored.sort_by(|(score_a, a), (score_b, b)| {
                score_b
                    .partial_cmp(score_a)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| {
                        b.popularity
                            .partial_cmp(&a.popularity)
                            .unwrap_or(Ordering::Equal)
                    })
                    .then_with(|| a.id.cmp(&b.id))
            });
            scored
                .into_iter()
                .map(|(score, m)| ScoredMovie {
                    movie_id: m.id,
                    score,
                })
                .collect()
        }
        None => {
            debug!(
                candidates = candidates.len(),
                path = "cold",
                "ranking candidates"
            );
            candidates.sort_by(|a, b| {
                b.popularity
                    .partial_cmp(&a.popularity)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
            candidates
                .into_iter()
                .map(|m| ScoredMovie {
                    movie_id: m.id,
                    score: m.popularity,
                })
                .collect()
        }
    };

    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::build_profile;
    use crate::models::Rating;

    fn movie(id: i64, genres: &[&str], popularity: f32) -> Movie {
        Movie {
            id,
            title: format!("M{id}"),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            overview: String::new(),
            year: None,
            popularity,
        }
    }

    fn rating(movie_id: i64, value: f32) -> Rating {
        Rating {
            user_id: 1,
            movie_id,
            rating: value,
        }
    }

    /// Two action movies and one drama, popularity 10 / 5 / 8
    fn create_example_catalog() -> Vec<Movie> {
        vec![
            movie(1, &["Action"], 10.0),
            movie(2, &["Action"], 5.0),
            movie(3, &["Drama"], 8.0),
        ]
    }

    fn ids(ranked: &[ScoredMovie]) -> Vec<MovieId> {
        ranked.iter().map(|s| s.movie_id).collect()
    }

    #[test]
    fn test_warm_path_prefers_shared_genre() {
        let movies = create_example_catalog();
        let index = CorpusIndex::build(&movies, 2.0);
        let profile = build_profile(&[rating(1, 5.0)], &index);
        assert!(!profile.is_empty());

        let rated = HashSet::from([1]);
        let ranked = recommend(&profile, &rated, &movies, &index, 10);

        // M1 is excluded; M2 shares the liked genre and outranks M3
        assert_eq!(ids(&ranked), vec![2, 3]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_cold_start_orders_by_popularity() {
        let movies = create_example_catalog();
        let index = CorpusIndex::build(&movies, 2.0);
        let profile = UserProfile::empty();

        let ranked = recommend(&profile, &HashSet::new(), &movies, &index, 2);

        assert_eq!(ids(&ranked), vec![1, 3]);
        assert_eq!(ranked[0].score, 10.0);
        assert_eq!(ranked[1].score, 8.0);
    }

    #[test]
    fn test_cold_start_ties_break_by_ascending_id() {
        let movies = vec![
            movie(4, &["Drama"], 7.0),
            movie(2, &["Drama"], 7.0),
            movie(9, &["Drama"], 7.0),
        ];
        let index = CorpusIndex::build(&movies, 2.0);

        let ranked = recommend(&UserProfile::empty(), &HashSet::new(), &movies, &index, 10);
        assert_eq!(ids(&ranked), vec![2, 4, 9]);
    }

    #[test]
    fn test_warm_ties_break_by_popularity_then_id() {
        // Three drama candidates are equally similar to a drama-loving
        // profile; popularity must order them, then id.
        let movies = vec![
            movie(1, &["Drama"], 1.0),
            movie(2, &["Drama"], 3.0),
            movie(3, &["Drama"], 9.0),
            movie(4, &["Drama"], 3.0),
        ];
        let index = CorpusIndex::build(&movies, 2.0);
        let profile = build_profile(&[rating(1, 5.0)], &index);

        let rated = HashSet::from([1]);
        let ranked = recommend(&profile, &rated, &movies, &index, 10);
        assert_eq!(ids(&ranked), vec![3, 2, 4]);
    }

    #[test]
    fn test_rated_movies_never_recommended() {
        let movies = create_example_catalog();
        let index = CorpusIndex::build(&movies, 2.0);
        let profile = build_profile(&[rating(1, 5.0), rating(3, 4.0)], &index);

        let rated = HashSet::from([1, 3]);
        let ranked = recommend(&profile, &rated, &movies, &index, 10);
        assert_eq!(ids(&ranked), vec![2]);
    }

    #[test]
    fn test_limit_clamps_to_candidate_count() {
        let movies = create_example_catalog();
        let index = CorpusIndex::build(&movies, 2.0);

        let ranked = recommend(&UserProfile::empty(), &HashSet::new(), &movies, &index, 50);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_empty_catalog_returns_empty() {
        let index = CorpusIndex::build(&[], 2.0);
        let ranked = recommend(&UserProfile::empty(), &HashSet::new(), &[], &index, 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_degenerate_warm_scores_fall_back_to_popularity() {
        // The user's profile exists but no candidate shares a term with it,
        // so every warm score is zero and popularity decides.
        let movies = vec![
            movie(1, &["Action"], 1.0),
            movie(2, &["Drama"], 2.0),
            movie(3, &["Comedy"], 8.0),
        ];
        let index = CorpusIndex::build(&movies, 2.0);
        let profile = build_profile(&[rating(1, 5.0)], &index);

        let rated = HashSet::from([1]);
        let ranked = recommend(&profile, &rated, &movies, &index, 10);

        assert_eq!(ids(&ranked), vec![3, 2]);
        // Fallback reports popularity as the score
        assert_eq!(ranked[0].score, 8.0);
    }

    #[test]
    fn test_suppressed_candidates_rank_last() {
        let movies = vec![
            movie(1, &["Action"], 5.0),
            movie(2, &["Action"], 5.0),
            movie(3, &["Drama"], 5.0),
            movie(4, &["Comedy"], 5.0),
        ];
        let index = CorpusIndex::build(&movies, 2.0);
        // Loved action, hated drama
        let profile = build_profile(&[rating(1, 5.0), rating(3, 0.0)], &index);

        let rated = HashSet::from([1, 3]);
        let ranked = recommend(&profile, &rated, &movies, &index, 10);

        // Comedy scores zero, drama-free action scores positive; there is no
        // drama candidate left, but order must hold: positive, then zero.
        assert_eq!(ids(&ranked), vec![2, 4]);
        assert!(ranked[0].score > 0.0);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let movies = create_example_catalog();
        let index = CorpusIndex::build(&movies, 2.0);
        let profile = build_profile(&[rating(1, 5.0)], &index);
        let rated = HashSet::from([1]);

        let first = recommend(&profile, &rated, &movies, &index, 10);
        let second = recommend(&profile, &rated, &movies, &index, 10);
        assert_eq!(first, second);
    }
}
