use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Item, MetadataRecord},
};

use super::state::{AppState, MAX_RESULTS};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
    pub k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingQuery {
    pub count: Option<usize>,
}

/// A movie ready for display: catalog fields plus remote metadata
#[derive(Debug, Serialize)]
pub struct MovieCard {
    pub title: String,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    pub metadata: MetadataRecord,
}

impl MovieCard {
    fn new(item: Item, metadata: MetadataRecord) -> Self {
        Self {
            title: item.title,
            genre: item.genre,
            score: None,
            metadata,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub results: Vec<MovieCard>,
}

fn check_limit(name: &str, value: usize) -> AppResult<usize> {
    if value > MAX_RESULTS {
        return Err(AppError::InvalidInput(format!(
            "{} must be at most {}",
            name, MAX_RESULTS
        )));
    }
    Ok(value)
}

async fn cards(state: &AppState, items: &[&Item]) -> Vec<MovieCard> {
    state
        .recommender
        .enrich(items)
        .await
        .into_iter()
        .map(|(item, metadata)| MovieCard::new(item, metadata))
        .collect()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommend movies similar to `title`
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = params.title.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "title query parameter cannot be empty".to_string(),
        ));
    }
    let k = check_limit("k", params.k.unwrap_or(state.default_k))?;

    let scored = state.recommender.recommend_scored(&query, k);

    tracing::info!(
        request_id = %request_id,
        query = %query,
        k,
        results = scored.len(),
        "Processing recommendation request"
    );

    let items: Vec<&Item> = scored.iter().map(|s| s.item).collect();
    let mut results = cards(&state, &items).await;
    for (card, s) in results.iter_mut().zip(&scored) {
        card.score = Some(s.score);
    }

    Ok(Json(RecommendationResponse { query, results }))
}

/// List movies, optionally filtered by exact genre tag
pub async fn movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenreQuery>,
) -> Json<Vec<MovieCard>> {
    let genre = params.genre.unwrap_or_default().trim().to_string();
    let items = state.recommender.by_genre(&genre);

    tracing::debug!(genre = %genre, results = items.len(), "Genre filter applied");

    Json(cards(&state, &items).await)
}

/// Distinct genre tags, sorted
pub async fn genres(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .recommender
            .genres()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// Random sample of the catalog
pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingQuery>,
) -> AppResult<Json<Vec<MovieCard>>> {
    let count = check_limit("count", params.count.unwrap_or(state.default_trending))?;
    let items = state.recommender.trending(count);

    Ok(Json(cards(&state, &items).await))
}

/// Metadata for a single catalog title
pub async fn movie_metadata(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> AppResult<Json<MovieCard>> {
    let catalog = state.recommender.catalog();
    let item = catalog
        .resolve(&title)
        .and_then(|index| catalog.get(index))
        .ok_or_else(|| AppError::NotFound(format!("No movie titled {:?}", title)))?;

    let metadata = state.recommender.metadata().get(&item.title).await;

    Ok(Json(MovieCard::new(item.clone(), metadata)))
}
