//! TF-IDF feature extraction.
//!
//! Turns a movie's genre labels and overview text into a sparse,
//! unit-normalized weight vector against corpus-wide document frequencies.
//! Vectors are sparse maps keyed by term; using an ordered map keeps every
//! iteration in term order, so sums and dot products are reproducible to the
//! bit for identical inputs.

use std::collections::{BTreeMap, HashSet};

use crate::engine::text::{tokenize_movie, Token};
use crate::models::Movie;

/// Corpus-wide statistics needed to weight a single movie's terms
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Total number of movies in the corpus
    pub doc_count: usize,
    /// Number of movies containing each term at least once
    doc_freq: BTreeMap<String, u32>,
}

impl CorpusStats {
    /// Collect document frequencies over the whole catalog
    pub fn collect(movies: &[Movie]) -> Self {
        let mut doc_freq: BTreeMap<String, u32> = BTreeMap::new();
        for movie in movies {
            let unique: HashSet<String> = tokenize_movie(movie)
                .into_iter()
                .map(|token| token.term)
                .collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
        Self {
            doc_count: movies.len(),
            doc_freq,
        }
    }

    /// Smoothed inverse document frequency: `ln(1 + N/df)`.
    ///
    /// Finite and strictly positive for every observed term (df >= 1), so no
    /// separate epsilon is needed even when a term appears in every movie.
    pub fn idf(&self, term: &str) -> f32 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0);
        if df == 0 {
            return 0.0;
        }
        (1.0 + self.doc_count as f32 / df as f32).ln()
    }

    /// Number of distinct terms observed across the corpus
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }
}

/// Sparse term-weight vector of a movie or a user profile.
///
/// Invariant: either the zero vector (no weights) or unit L2 norm within
/// floating-point tolerance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    weights: BTreeMap<String, f32>,
}

impl FeatureVector {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from raw weights, dropping zero entries and L2-normalizing.
    /// An all-zero input yields the zero vector.
    pub fn from_raw(raw: BTreeMap<String, f32>) -> Self {
        let mut weights: BTreeMap<String, f32> = raw
            .into_iter()
            .filter(|(_, w)| *w != 0.0)
            .collect();

        let norm = weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in weights.values_mut() {
                *w /= norm;
            }
            Self { weights }
        } else {
            Self::zero()
        }
    }

    /// The zero vector marks a movie with no usable genre/overview signal
    pub fn is_zero(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn l2_norm(&self) -> f32 {
        self.weights.values().map(|w| w * w).sum::<f32>().sqrt()
    }

    pub fn weight(&self, term: &str) -> f32 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.weights.iter().map(|(term, &w)| (term.as_str(), w))
    }

    /// Dot product over the shared terms of two vectors.
    ///
    /// Both maps are walked as one merged, term-ordered sequence, so the
    /// additions happen in the same order whichever operand comes first:
    /// `a.dot(b)` and `b.dot(a)` are bit-identical.
    pub fn dot(&self, other: &FeatureVector) -> f32 {
        let mut lhs = self.weights.iter().peekable();
        let mut rhs = other.weights.iter().peekable();
        let mut sum = 0.0f32;

        while let (Some((lt, lw)), Some((rt, rw))) = (lhs.peek(), rhs.peek()) {
            match lt.cmp(rt) {
                std::cmp::Ordering::Less => {
                    lhs.next();
                }
                std::cmp::Ordering::Greater => {
                    rhs.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += *lw * *rw;
                    lhs.next();
                    rhs.next();
                }
            }
        }
        sum
    }
}

/// Computes a movie's feature vector against corpus statistics
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    /// Multiplier for terms originating from genre labels, > 1
    genre_boost: f32,
}

impl FeatureExtractor {
    pub fn new(genre_boost: f32) -> Self {
        Self { genre_boost }
    }

    /// `extract(movie, corpus_stats) -> FeatureVector`
    ///
    /// Weight of term t: `tf(t) * idf(t)`, where tf is the raw count over
    /// the combined genre+overview stream, times the genre boost for terms
    /// that occurred as a genre label. The result is unit-normalized, or the
    /// zero vector when nothing survives tokenization.
    pub fn extract(&self, movie: &Movie, stats: &CorpusStats) -> FeatureVector {
        let tokens = tokenize_movie(movie);

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        let mut genre_terms: HashSet<String> = HashSet::new();
        for Token { term, from_genre } in tokens {
            *counts.entry(term.clone()).or_insert(0) += 1;
            if from_genre {
                genre_terms.insert(term);
            }
        }

        let raw: BTreeMap<String, f32> = counts
            .into_iter()
            .map(|(term, tf)| {
                let boost = if genre_terms.contains(&term) {
                    self.genre_boost
                } else {
                    1.0
                };
                let weight = tf as f32 * boost * stats.idf(&term);
                (term, weight)
            })
            .collect();

        FeatureVector::from_raw(raw)
    }
}
