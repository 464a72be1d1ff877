//! Corpus index: every movie's feature vector plus the statistics they were
//! weighted against.
//!
//! Document frequencies are corpus-wide, so a single catalog change can shift
//! every weight. The index is therefore rebuilt wholesale and never mutated:
//! `build` produces an immutable value that callers share behind an `Arc`,
//! and a rebuild swaps in a fresh one while in-flight readers keep their
//! snapshot.

use std::collections::HashMap;

use tracing::info;

use crate::engine::features::{CorpusStats, FeatureExtractor, FeatureVector};
use crate::models::{Movie, MovieId};

/// Immutable snapshot of the whole catalog's feature vectors
#[derive(Debug, Default)]
pub struct CorpusIndex {
    vectors: HashMap<MovieId, FeatureVector>,
    stats: CorpusStats,
}

impl CorpusIndex {
    /// An index over an empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index over the full catalog in two passes: collect document
    /// frequencies, then extract every movie against them.
    pub fn build(movies: &[Movie], genre_boost: f32) -> Self {
        let stats = CorpusStats::collect(movies);
        let extractor = FeatureExtractor::new(genre_boost);

        let vectors: HashMap<MovieId, FeatureVector> = movies
            .iter()
            .map(|movie| (movie.id, extractor.extract(movie, &stats)))
            .collect();

        let featureless = vectors.values().filter(|v| v.is_zero()).count();
        info!(
            movies = movies.len(),
            vocabulary = stats.vocabulary_size(),
            featureless,
            "built corpus index"
        );

        Self { vectors, stats }
    }

    /// Feature vector of a movie; the zero vector for unknown ids
    pub fn vector_of(&self, movie_id: MovieId) -> Option<&FeatureVector> {
        self.vectors.get(&movie_id)
    }

    /// Whether the movie has no usable genre/overview signal.
    /// Unknown ids are treated as featureless.
    pub fn is_featureless(&self, movie_id: MovieId) -> bool {
        self.vectors.get(&movie_id).map_or(true, |v| v.is_zero())
    }

    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, genres: &[&str], overview: &str) -> Movie {
        Movie {
            id,
            title: format!("M{id}"),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            overview: overview.to_string(),
            year: None,
            popularity: 0.0,
        }
    }

    #[test]
    fn test_build_indexes_every_movie() {
        let movies = vec![
            movie(1, &["Action"], "cop thriller"),
            movie(2, &["Drama"], ""),
            movie(3, &[], ""),
        ];
        let index = CorpusIndex::build(&movies, 2.0);

        assert_eq!(index.len(), 3);
        assert!(index.vector_of(1).is_some());
        assert!(!index.is_featureless(1));
        assert!(!index.is_featureless(2));
        // No genres and no overview text
        assert!(index.is_featureless(3));
        // Ids outside the catalog
        assert!(index.vector_of(99).is_none());
        assert!(index.is_featureless(99));
    }

    #[test]
    fn test_empty_catalog() {
        let index = CorpusIndex::build(&[], 2.0);
        assert!(index.is_empty());
        assert_eq!(index.stats().doc_count, 0);
    }

    #[test]
    fn test_rebuild_shifts_weights_with_corpus() {
        // Adding a movie changes df, which must change existing weights:
        // with a second "Action" movie the genre becomes less distinctive
        // relative to each movie's other terms.
        let small = vec![
            movie(1, &["Action"], "heist"),
            movie(2, &["Drama"], "family"),
        ];
        let grown = vec![
            movie(1, &["Action"], "heist"),
            movie(2, &["Drama"], "family"),
            movie(3, &["Action"], "war"),
        ];

        let before = CorpusIndex::build(&small, 2.0);
        let after = CorpusIndex::build(&grown, 2.0);

        let w_before = before.vector_of(1).unwrap().weight("Action");
        let w_after = after.vector_of(1).unwrap().weight("Action");
        assert!(w_after < w_before);
    }

    #[test]
    fn test_build_is_deterministic() {
        let movies = vec![
            movie(1, &["Action"], "cop thriller"),
            movie(2, &["Drama"], "slow summer"),
        ];
        let a = CorpusIndex::build(&movies, 2.0);
        let b = CorpusIndex::build(&movies, 2.0);
        for m in &movies {
            assert_eq!(a.vector_of(m.id), b.vector_of(m.id));
        }
    }
}
