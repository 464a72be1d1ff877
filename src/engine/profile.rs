//! User taste profiles.
//!
//! A profile is one vector in the same feature space as the movies, built
//! from the user's ratings against the current corpus snapshot. Profiles are
//! derived per request and never stored.

use std::collections::BTreeMap;

use crate::engine::features::FeatureVector;
use crate::engine::index::CorpusIndex;
use crate::models::Rating;

/// Midpoint of the [0, 5] rating scale. Ratings above it promote similar
/// movies, ratings at or below it suppress them.
pub const NEUTRAL_RATING: f32 = 2.5;

/// A user's aggregated taste vector, or empty when the user has no usable
/// rating history (the cold-start signal).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    vector: FeatureVector,
}

impl UserProfile {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cold start: no ratings, only featureless rated movies, or a signed
    /// sum that cancelled to the zero vector
    pub fn is_empty(&self) -> bool {
        self.vector.is_zero()
    }

    pub fn vector(&self) -> &FeatureVector {
        &self.vector
    }
}

/// `build_profile(ratings, corpus_index) -> UserProfile`
///
/// Sums `(rating - neutral) * vector_of(movie)` over the rated,
/// non-featureless movies, then L2-normalizes. Ratings are visited in
/// ascending movie-id order so the accumulation order, and therefore the
/// result, is reproducible.
pub fn build_profile(ratings: &[Rating], index: &CorpusIndex) -> UserProfile {
    let mut ordered: Vec<&Rating> = ratings.iter().collect();
    ordered.sort_by_key(|r| r.movie_id);

    let mut sum: BTreeMap<String, f32> = BTreeMap::new();
    for rating in ordered {
        let Some(vector) = index.vector_of(rating.movie_id) else {
            continue;
        };
        if vector.is_zero() {
            continue;
        }
        let signed_weight = rating.rating - NEUTRAL_RATING;
        for (term, weight) in vector.iter() {
            *sum.entry(term.to_string()).or_insert(0.0) += signed_weight * weight;
        }
    }

    UserProfile {
        vector: FeatureVector::from_raw(sum),
    }
}
