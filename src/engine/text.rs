//! Tokenization of movie metadata.
//!
//! Genres contribute one exact-match term per category label; the overview is
//! broken into lowercase word terms with stop words removed. A token records
//! whether it came from a genre label so the extractor can boost it.

use crate::models::Movie;

/// Minimum length of an overview term
const MIN_TERM_LENGTH: usize = 2;

/// Common English words carrying no taste signal.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "be", "are", "was", "were", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "can", "shall", "not", "no",
    "but", "if", "at", "by", "from", "as", "into", "about", "up", "out", "so", "its", "you",
    "your", "we", "our", "they", "them", "their", "he", "she", "his", "her", "him", "who",
    "what", "when", "where", "which", "while", "after", "before", "between", "through",
];

/// A term plus its origin in the movie record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub from_genre: bool,
}

/// Produce the combined genre+overview token stream of a movie.
///
/// Genre labels are trimmed but otherwise kept verbatim (a label is a term,
/// never split further). Overview text is lowercased and split on
/// non-alphanumeric boundaries; empty, short, and stop-word tokens are
/// dropped.
pub fn tokenize_movie(movie: &Movie) -> Vec<Token> {
    let mut tokens = Vec::new();

    for genre in &movie.genres {
        let label = genre.trim();
        if !label.is_empty() {
            tokens.push(Token {
                term: label.to_string(),
                from_genre: true,
            });
        }
    }

    for term in tokenize_text(&movie.overview) {
        tokens.push(Token {
            term,
            from_genre: false,
        });
    }

    tokens
}

/// Tokenize free text: lowercase, split on non-alphanumeric, filter short
/// tokens and stop words.
pub fn tokenize_text(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= MIN_TERM_LENGTH)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}
