use serde::{Deserialize, Serialize};

/// A recommendable movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Display title, unique within the catalog under case-insensitive comparison
    pub title: String,
    /// Free-text genre tag (e.g., "Action Sci-Fi")
    pub genre: String,
    /// Feature vector used for similarity ranking
    #[serde(default, skip_serializing)]
    pub features: Vec<f32>,
}

impl Item {
    /// Creates a new catalog item
    pub fn new(title: impl Into<String>, genre: impl Into<String>, features: Vec<f32>) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            features,
        }
    }
}

/// An item paired with its similarity to the query item
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<'a> {
    pub item: &'a Item,
    pub score: f32,
}
