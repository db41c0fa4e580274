use serde::{Deserialize, Serialize};

/// Poster shown when no remote poster is available
pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/300x450/111b3b/FFFFFF?text=No+Poster";

/// Value used for every text field the remote catalog could not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Display metadata for a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieMetadata {
    pub poster: String,
    pub year: String,
    pub rating: String,
    pub genre: String,
    pub plot: String,
}

impl MovieMetadata {
    /// The fixed sentinel values used when enrichment is unavailable
    pub fn placeholder() -> Self {
        Self {
            poster: PLACEHOLDER_POSTER.to_string(),
            year: NOT_AVAILABLE.to_string(),
            rating: NOT_AVAILABLE.to_string(),
            genre: NOT_AVAILABLE.to_string(),
            plot: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Metadata as handed out by the metadata cache
///
/// `Remote` carries what the provider returned. `Placeholder` always carries
/// [`MovieMetadata::placeholder`] and marks a failed or missing lookup.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MetadataRecord {
    Remote(MovieMetadata),
    Placeholder(MovieMetadata),
}

impl MetadataRecord {
    pub fn placeholder() -> Self {
        MetadataRecord::Placeholder(MovieMetadata::placeholder())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, MetadataRecord::Placeholder(_))
    }

    pub fn metadata(&self) -> &MovieMetadata {
        match self {
            MetadataRecord::Remote(m) | MetadataRecord::Placeholder(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_values() {
        let record = MetadataRecord::placeholder();
        assert!(record.is_placeholder());

        let meta = record.metadata();
        assert_eq!(meta.poster, PLACEHOLDER_POSTER);
        assert_eq!(meta.year, "N/A");
        assert_eq!(meta.rating, "N/A");
        assert_eq!(meta.genre, "N/A");
        assert_eq!(meta.plot, "N/A");
    }

    #[test]
    fn test_record_serialization_tagged() {
        let record = MetadataRecord::Remote(MovieMetadata {
            poster: "https://example.com/inception.jpg".to_string(),
            year: "2010".to_string(),
            rating: "8.8".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
            plot: "A thief who steals corporate secrets.".to_string(),
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["source"], "remote");
        assert_eq!(json["year"], "2010");

        let json = serde_json::to_value(MetadataRecord::placeholder()).unwrap();
        assert_eq!(json["source"], "placeholder");
        assert_eq!(json["plot"], "N/A");
    }
}
