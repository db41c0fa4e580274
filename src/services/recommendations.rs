use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::sync::{Arc, Mutex};

use crate::{
    models::{Item, MetadataRecord, ScoredItem},
    services::{catalog::CatalogStore, metadata_cache::MetadataCache, similarity::SimilarityIndex},
};

/// Genre filter value meaning "no filter"
pub const ALL_GENRES: &str = "All";

/// Orchestrates catalog lookup, similarity ranking and metadata enrichment
///
/// The catalog and similarity matrix are immutable and shared; the metadata
/// cache is a handle to state that lives as long as the process.
pub struct RecommendationService {
    catalog: Arc<CatalogStore>,
    index: Arc<SimilarityIndex>,
    metadata: MetadataCache,
    rng: Mutex<StdRng>,
}

impl RecommendationService {
    /// Builds the similarity index for `catalog`; trending samples are random
    pub fn new(catalog: Arc<CatalogStore>, metadata: MetadataCache) -> Self {
        Self::with_rng(catalog, metadata, StdRng::from_entropy())
    }

    /// Like [`RecommendationService::new`] with reproducible trending samples
    pub fn with_seed(catalog: Arc<CatalogStore>, metadata: MetadataCache, seed: u64) -> Self {
        Self::with_rng(catalog, metadata, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Arc<CatalogStore>, metadata: MetadataCache, rng: StdRng) -> Self {
        let index = Arc::new(SimilarityIndex::build(&catalog));
        debug_assert_eq!(index.len(), catalog.len());

        Self {
            catalog,
            index,
            metadata,
            rng: Mutex::new(rng),
        }
    }

    /// Up to `k` items most similar to `query`, best first
    ///
    /// An unknown title is an ordinary outcome and yields an empty list.
    pub fn recommend(&self, query: &str, k: usize) -> Vec<&Item> {
        self.recommend_scored(query, k)
            .into_iter()
            .map(|scored| scored.item)
            .collect()
    }

    /// Same ranking as [`RecommendationService::recommend`], with scores
    pub fn recommend_scored(&self, query: &str, k: usize) -> Vec<ScoredItem<'_>> {
        let Some(index) = self.catalog.resolve(query) else {
            tracing::debug!(query = %query, "No catalog match for query");
            return Vec::new();
        };

        let neighbors = match self.index.top_k(index, k) {
            Ok(neighbors) => neighbors,
            Err(e) => {
                // Unreachable while the index is built from this catalog
                tracing::error!(error = %e, query = %query, "Similarity lookup failed");
                return Vec::new();
            }
        };

        neighbors
            .into_iter()
            .filter_map(|(j, score)| self.catalog.get(j).map(|item| ScoredItem { item, score }))
            .collect()
    }

    /// Items tagged exactly `genre`, in catalog order
    ///
    /// An empty filter or [`ALL_GENRES`] returns the whole catalog. The tag is
    /// matched as given; callers trim user input.
    pub fn by_genre(&self, genre: &str) -> Vec<&Item> {
        if genre.is_empty() || genre == ALL_GENRES {
            return self.catalog.items().iter().collect();
        }

        self.catalog
            .by_genre(genre)
            .into_iter()
            .filter_map(|index| self.catalog.get(index))
            .collect()
    }

    /// A random sample of `min(sample_size, N)` distinct items
    ///
    /// Order and membership differ between calls unless the service was
    /// built with [`RecommendationService::with_seed`].
    pub fn trending(&self, sample_size: usize) -> Vec<&Item> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.trending_with_rng(&mut *rng, sample_size)
    }

    /// [`RecommendationService::trending`] driven by a caller-supplied generator
    pub fn trending_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        sample_size: usize,
    ) -> Vec<&Item> {
        self.catalog
            .items()
            .choose_multiple(rng, sample_size)
            .collect()
    }

    /// Pairs each item with its cached metadata, preserving order
    pub async fn enrich(&self, items: &[&Item]) -> Vec<(Item, MetadataRecord)> {
        let titles: Vec<String> = items.iter().map(|item| item.title.clone()).collect();
        let records = self.metadata.get_many(&titles).await;

        items
            .iter()
            .map(|item| (*item).clone())
            .zip(records)
            .collect()
    }

    pub fn genres(&self) -> Vec<&str> {
        self.catalog.genres()
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn metadata(&self) -> &MetadataCache {
        &self.metadata
    }
}
