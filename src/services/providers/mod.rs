/// Remote metadata provider abstraction
///
/// The metadata cache depends only on this trait, so the OMDb client can be
/// swapped for another catalog service or a test double.
use crate::{error::FetchError, models::MovieMetadata};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for remote movie metadata sources
///
/// Implementations report "title not found" as [`FetchError::NotFound`] so it
/// stays distinguishable from transport failures in the logs.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch display metadata for a title
    async fn fetch(&self, title: &str) -> Result<MovieMetadata, FetchError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
