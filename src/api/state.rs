use std::sync::Arc;

use crate::services::RecommendationService;

/// Largest `k` or `count` a client may ask for
pub const MAX_RESULTS: usize = 50;

/// Shared application state
///
/// Everything here is either immutable or internally synchronized, so
/// handlers share it without an outer lock.
pub struct AppState {
    pub recommender: Arc<RecommendationService>,
    /// Recommendations returned when the request does not specify `k`
    pub default_k: usize,
    /// Trending sample size when the request does not specify `count`
    pub default_trending: usize,
}

impl AppState {
    pub fn new(recommender: Arc<RecommendationService>, default_k: usize) -> Self {
        Self {
            recommender,
            default_k,
            default_trending: 10,
        }
    }
}
