use std::collections::{BTreeSet, HashMap};

use crate::{error::CatalogError, models::Item};

/// Immutable, ordered table of catalog items
///
/// Built once at startup and shared read-only. Titles are unique under
/// case-insensitive comparison and every feature vector has the same length.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    items: Vec<Item>,
    by_title: HashMap<String, usize>,
    dimension: usize,
}

fn title_key(title: &str) -> String {
    title.to_lowercase()
}

impl CatalogStore {
    /// Validates the items and builds the store, preserving input order
    pub fn build(items: Vec<Item>) -> Result<Self, CatalogError> {
        let dimension = items.first().map(|item| item.features.len()).unwrap_or(0);
        let mut by_title = HashMap::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            if item.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle { index });
            }

            if item.features.len() != dimension {
                return Err(CatalogError::DimensionMismatch {
                    index,
                    expected: dimension,
                    found: item.features.len(),
                });
            }

            if item.features.iter().any(|v| !v.is_finite()) {
                return Err(CatalogError::NonFiniteFeature {
                    title: item.title.clone(),
                });
            }

            if by_title.insert(title_key(&item.title), index).is_some() {
                return Err(CatalogError::DuplicateTitle {
                    title: item.title.clone(),
                });
            }
        }

        tracing::info!(items = items.len(), dimension, "Catalog built");

        Ok(Self {
            items,
            by_title,
            dimension,
        })
    }

    /// Case-insensitive exact title lookup
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.by_title.get(&title_key(title)).copied()
    }

    /// Indices of items whose genre tag equals `genre` exactly, in catalog order
    pub fn by_genre(&self, genre: &str) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.genre == genre)
            .map(|(index, _)| index)
            .collect()
    }

    /// Distinct genre tags, sorted
    pub fn genres(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| item.genre.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Feature vector length shared by every item (0 for an empty catalog)
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, genre: &str) -> Item {
        Item::new(title, genre, vec![1.0, 0.0])
    }

    fn genre_catalog() -> CatalogStore {
        CatalogStore::build(vec![
            item("Avengers", "Action"),
            item("Titanic", "Romance"),
            item("Gladiator", "Action"),
            item("Up", "Animation"),
            item("Iron Man", "Action"),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let catalog = CatalogStore::build(vec![item("Avatar", "Action Sci-Fi")]).unwrap();
        assert_eq!(catalog.resolve("AVATAR"), Some(0));
        assert_eq!(catalog.resolve("avatar"), Some(0));
        assert_eq!(catalog.resolve("Avatar"), Some(0));
    }

    #[test]
    fn test_resolve_is_exact() {
        let catalog = CatalogStore::build(vec![item("The Matrix", "Action Sci-Fi")]).unwrap();
        assert_eq!(catalog.resolve("Matrix"), None);
        assert_eq!(catalog.resolve(" the matrix "), None);
    }

    #[test]
    fn test_by_genre_preserves_order() {
        let catalog = genre_catalog();
        assert_eq!(catalog.by_genre("Action"), vec![0, 2, 4]);
    }

    #[test]
    fn test_by_genre_case_sensitive() {
        let catalog = genre_catalog();
        assert!(catalog.by_genre("action").is_empty());
    }

    #[test]
    fn test_genres_sorted_distinct() {
        let catalog = genre_catalog();
        assert_eq!(catalog.genres(), vec!["Action", "Animation", "Romance"]);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = CatalogStore::build(vec![
            Item::new("A", "x", vec![1.0, 0.0]),
            Item::new("B", "x", vec![1.0, 0.0, 0.0]),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let result =
            CatalogStore::build(vec![item("Frozen", "Animation"), item("FROZEN", "Musical")]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateTitle { title }) if title == "FROZEN"
        ));
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = CatalogStore::build(vec![item("  ", "Drama")]);
        assert_eq!(result.unwrap_err(), CatalogError::EmptyTitle { index: 0 });
    }

    #[test]
    fn test_non_finite_feature_rejected() {
        let result = CatalogStore::build(vec![Item::new("Up", "Family", vec![f32::NAN, 1.0])]);
        assert!(matches!(result, Err(CatalogError::NonFiniteFeature { .. })));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = CatalogStore::build(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.dimension(), 0);
        assert_eq!(catalog.resolve("anything"), None);
    }
}
