//! Content-based recommendation engine.
//!
//! The pipeline: movie records are tokenized and weighted into unit
//! feature vectors against corpus-wide document frequencies
//! ([`features`]), held together in an immutable [`index::CorpusIndex`]
//! snapshot; a user's ratings fold into a single taste vector
//! ([`profile`]); and [`ranker::recommend`] scores the unrated catalog
//! against that profile, falling back to popularity on cold start.
//!
//! Everything here is synchronous and pure: given the same catalog,
//! ratings, and limit, the output sequence is identical on every call.

pub mod features;
pub mod index;
pub mod profile;
pub mod ranker;
pub mod text;

pub use features::{CorpusStats, FeatureExtractor, FeatureVector};
pub use index::CorpusIndex;
pub use profile::{build_profile, UserProfile, NEUTRAL_RATING};
pub use ranker::{recommend, ScoredMovie};
