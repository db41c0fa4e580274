//! Catalog bootstrap
//!
//! Provides the built-in movie list and loads alternative catalogs from JSON.
//! Feature vectors are placeholders: uniform random values drawn from a seeded
//! generator, so any real embedding can replace them without touching ranking.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;

use crate::{error::CatalogError, models::Item};

/// Built-in (title, genre) pairs
const BUILTIN_MOVIES: &[(&str, &str)] = &[
    ("Avatar", "Action Sci-Fi"),
    ("Avengers", "Action Adventure"),
    ("Titanic", "Romance Drama"),
    ("The Dark Knight", "Action Crime"),
    ("Inception", "Sci-Fi Mystery"),
    ("Interstellar", "Sci-Fi Adventure"),
    ("The Matrix", "Action Sci-Fi"),
    ("Jurassic Park", "Adventure Sci-Fi"),
    ("Iron Man", "Action Sci-Fi"),
    ("Spider-Man", "Action Fantasy"),
    ("Doctor Strange", "Fantasy Action"),
    ("Black Panther", "Action Adventure"),
    ("The Lion King", "Animation Family"),
    ("Frozen", "Animation Musical"),
    ("Toy Story", "Animation Comedy"),
    ("Finding Nemo", "Animation Adventure"),
    ("Shutter Island", "Thriller Mystery"),
    ("Gladiator", "Action History"),
    ("Up", "Animation Family"),
    ("Coco", "Animation Family"),
];

/// A catalog entry before feature vectors are attached
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub features: Option<Vec<f32>>,
}

pub fn builtin_entries() -> Vec<CatalogEntry> {
    BUILTIN_MOVIES
        .iter()
        .map(|(title, genre)| CatalogEntry {
            title: title.to_string(),
            genre: genre.to_string(),
            features: None,
        })
        .collect()
}

/// Attaches a uniform `[0, 1)` feature vector of length `dimension` to every entry
///
/// With `Some(seed)` the vectors are reproducible across runs.
pub fn generate_features(
    entries: Vec<CatalogEntry>,
    dimension: usize,
    seed: Option<u64>,
) -> Vec<Item> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    entries
        .into_iter()
        .map(|entry| {
            let features = (0..dimension).map(|_| rng.gen::<f32>()).collect();
            Item::new(entry.title, entry.genre, features)
        })
        .collect()
}

/// Turns entries into items, generating vectors only when none are supplied
///
/// Entries must either all carry features or all omit them.
pub fn into_items(
    entries: Vec<CatalogEntry>,
    dimension: usize,
    seed: Option<u64>,
) -> Result<Vec<Item>, CatalogError> {
    let with_features = entries.iter().filter(|e| e.features.is_some()).count();

    if with_features == 0 {
        return Ok(generate_features(entries, dimension, seed));
    }

    if with_features != entries.len() {
        return Err(CatalogError::Source(format!(
            "{} of {} entries carry feature vectors; expected all or none",
            with_features,
            entries.len()
        )));
    }

    Ok(entries
        .into_iter()
        .map(|e| Item::new(e.title, e.genre, e.features.unwrap_or_default()))
        .collect())
}

/// Reads a JSON array of `{title, genre, features?}` entries
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, CatalogError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Source(format!("{}: {}", path.display(), e)))?;

    let entries: Vec<CatalogEntry> = serde_json::from_str(&raw)
        .map_err(|e| CatalogError::Source(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), entries = entries.len(), "Loaded catalog file");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_entries() {
        let entries = builtin_entries();
        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].title, "Avatar");
        assert_eq!(entries[19].title, "Coco");
        assert!(entries.iter().all(|e| e.features.is_none()));
    }

    #[test]
    fn test_generate_features_seeded_is_reproducible() {
        let a = generate_features(builtin_entries(), 5, Some(7));
        let b = generate_features(builtin_entries(), 5, Some(7));
        assert_eq!(a, b);
        assert!(a.iter().all(|item| item.features.len() == 5));
        assert!(a
            .iter()
            .flat_map(|item| item.features.iter())
            .all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn test_into_items_keeps_supplied_features() {
        let entries = vec![
            CatalogEntry {
                title: "A".to_string(),
                genre: "x".to_string(),
                features: Some(vec![1.0, 0.0]),
            },
            CatalogEntry {
                title: "B".to_string(),
                genre: "x".to_string(),
                features: Some(vec![0.0, 1.0]),
            },
        ];

        let items = into_items(entries, 5, None).unwrap();
        assert_eq!(items[0].features, vec![1.0, 0.0]);
        assert_eq!(items[1].features, vec![0.0, 1.0]);
    }

    #[test]
    fn test_into_items_rejects_partial_features() {
        let entries = vec![
            CatalogEntry {
                title: "A".to_string(),
                genre: "x".to_string(),
                features: Some(vec![1.0]),
            },
            CatalogEntry {
                title: "B".to_string(),
                genre: "x".to_string(),
                features: None,
            },
        ];

        assert!(matches!(
            into_items(entries, 1, None),
            Err(CatalogError::Source(_))
        ));
    }

    #[test]
    fn test_load_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let catalog = serde_json::json!([
            { "title": "Up", "genre": "Animation Family" },
            { "title": "Coco", "genre": "Animation Family" },
        ]);
        serde_json::to_writer(&mut file, &catalog).unwrap();
        file.flush().unwrap();

        let entries = load_catalog_file(file.path()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].title, "Coco");
        assert!(entries[0].features.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_catalog_file("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CatalogError::Source(_))));
    }
}
