use serde::Deserialize;

pub mod item;
pub mod metadata;

pub use item::{Item, ScoredItem};
pub use metadata::{MetadataRecord, MovieMetadata, NOT_AVAILABLE, PLACEHOLDER_POSTER};

// ============================================================================
// OMDb API Types
// ============================================================================

/// Raw response from the OMDb title lookup (`GET /?t=...`)
///
/// OMDb always answers 200; `response` is `"True"` on a hit and `"False"`
/// with an `error` message otherwise.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbTitle {
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
}

impl OmdbTitle {
    pub fn found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }
}

impl From<OmdbTitle> for MovieMetadata {
    fn from(title: OmdbTitle) -> Self {
        let text = |field: Option<String>| field.unwrap_or_else(|| NOT_AVAILABLE.to_string());

        // OMDb reports a missing poster as the literal "N/A"
        let poster = title
            .poster
            .filter(|p| !p.is_empty() && p != NOT_AVAILABLE)
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string());

        MovieMetadata {
            poster,
            year: text(title.year),
            rating: text(title.imdb_rating),
            genre: text(title.genre),
            plot: text(title.plot),
        }
    }
}
