use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::engine::CorpusIndex;
use crate::store::CatalogStore;

/// Shared application state.
///
/// The store holds the catalog behind a reader/writer lock. The corpus index
/// is a separate immutable snapshot behind its own lock: recommend requests
/// clone the `Arc` and compute lock-free against a consistent view, while a
/// catalog mutation builds a replacement outside the write section and swaps
/// it in.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<CatalogStore>>,
    index: Arc<RwLock<Arc<CorpusIndex>>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state with an empty catalog and an empty index snapshot
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(CatalogStore::new())),
            index: Arc::new(RwLock::new(Arc::new(CorpusIndex::empty()))),
            config: Arc::new(config),
        }
    }

    /// The current index snapshot. Holding the returned `Arc` keeps the
    /// snapshot alive across any number of concurrent rebuilds.
    pub async fn index_snapshot(&self) -> Arc<CorpusIndex> {
        self.index.read().await.clone()
    }

    /// Rebuild the corpus index from the current catalog and swap it in.
    ///
    /// Called after every movie insert/update/delete, before the mutation's
    /// response is returned, so the next recommend request observes the
    /// change. Ratings never require this: they do not feed document
    /// frequencies.
    pub async fn rebuild_index(&self) {
        let movies = self.store.read().await.all_movies();
        let rebuilt = Arc::new(CorpusIndex::build(&movies, self.config.genre_boost));
        *self.index.write().await = rebuilt;
    }
}
