pub mod catalog;
pub mod metadata_cache;
pub mod providers;
pub mod recommendations;
pub mod seed;
pub mod similarity;

pub use catalog::CatalogStore;
pub use metadata_cache::MetadataCache;
pub use recommendations::RecommendationService;
pub use similarity::SimilarityIndex;
