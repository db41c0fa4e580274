/// OMDb API provider
///
/// Looks titles up with `GET /?t={title}&apikey={key}`. OMDb answers 200 for
/// both hits and misses and signals a miss with `"Response": "False"`.
use crate::{
    error::FetchError,
    models::{MovieMetadata, OmdbTitle},
    services::providers::MetadataProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    /// Creates a provider whose HTTP requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Converts a decoded OMDb body into metadata, or `NotFound` on a miss
    fn parse_title(title: &str, body: OmdbTitle) -> Result<MovieMetadata, FetchError> {
        if !body.found() {
            let reason = body
                .error
                .unwrap_or_else(|| format!("no OMDb entry for {:?}", title));
            return Err(FetchError::NotFound(reason));
        }

        Ok(MovieMetadata::from(body))
    }

    /// Maps an HTTP status and raw body onto metadata or a [`FetchError`]
    fn parse_response(
        title: &str,
        status: StatusCode,
        response_text: &str,
    ) -> Result<MovieMetadata, FetchError> {
        if !status.is_success() {
            tracing::error!(title = %title, status = %status, "OMDb request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        tracing::debug!(response = %response_text, "Raw OMDb API response");

        let body: OmdbTitle = serde_json::from_str(response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            FetchError::Malformed(e.to_string())
        })?;

        Self::parse_title(title, body)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn fetch(&self, title: &str) -> Result<MovieMetadata, FetchError> {
        let url = format!("{}/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        let metadata = Self::parse_response(title, status, &response_text)?;

        tracing::info!(
            title = %title,
            year = %metadata.year,
            provider = "omdb",
            "Metadata fetched"
        );

        Ok(metadata)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PLACEHOLDER_POSTER;

    fn decode(json: &str) -> OmdbTitle {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_found_title() {
        let body = decode(
            r#"{
                "Title": "Inception",
                "Year": "2010",
                "Genre": "Action, Adventure, Sci-Fi",
                "Plot": "A thief who steals corporate secrets through dream-sharing.",
                "Poster": "https://m.media-amazon.com/images/inception.jpg",
                "imdbRating": "8.8",
                "Response": "True"
            }"#,
        );

        let metadata = OmdbProvider::parse_title("Inception", body).unwrap();
        assert_eq!(metadata.year, "2010");
        assert_eq!(metadata.rating, "8.8");
        assert_eq!(metadata.genre, "Action, Adventure, Sci-Fi");
        assert_eq!(
            metadata.poster,
            "https://m.media-amazon.com/images/inception.jpg"
        );
    }

    #[test]
    fn test_parse_not_found() {
        let body = decode(r#"{"Response": "False", "Error": "Movie not found!"}"#);

        let err = OmdbProvider::parse_title("Nope", body).unwrap_err();
        assert!(matches!(err, FetchError::NotFound(msg) if msg == "Movie not found!"));
    }

    #[test]
    fn test_parse_missing_fields_default() {
        let body = decode(r#"{"Title": "Up", "Poster": "N/A", "Response": "True"}"#);

        let metadata = OmdbProvider::parse_title("Up", body).unwrap();
        assert_eq!(metadata.poster, PLACEHOLDER_POSTER);
        assert_eq!(metadata.year, "N/A");
        assert_eq!(metadata.rating, "N/A");
        assert_eq!(metadata.plot, "N/A");
    }

    #[test]
    fn test_error_status_maps_to_status() {
        let result = OmdbProvider::parse_response(
            "Up",
            StatusCode::SERVICE_UNAVAILABLE,
            "<html>Service Unavailable</html>",
        );
        assert!(matches!(result, Err(FetchError::Status(503))));

        let result = OmdbProvider::parse_response("Up", StatusCode::UNAUTHORIZED, "");
        assert!(matches!(result, Err(FetchError::Status(401))));
    }

    #[test]
    fn test_undecodable_body_is_malformed() {
        let result = OmdbProvider::parse_response("Up", StatusCode::OK, "not json");
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_response_without_marker_is_malformed() {
        let result = OmdbProvider::parse_response("Up", StatusCode::OK, r#"{"Title": "Up"}"#);
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_ok_response_with_miss_is_not_found() {
        let result = OmdbProvider::parse_response(
            "Nope",
            StatusCode::OK,
            r#"{"Response": "False", "Error": "Movie not found!"}"#,
        );
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[test]
    fn test_ok_response_with_hit_parses() {
        let metadata = OmdbProvider::parse_response(
            "Up",
            StatusCode::OK,
            r#"{"Title": "Up", "Year": "2009", "Response": "True"}"#,
        )
        .unwrap();
        assert_eq!(metadata.year, "2009");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let provider = OmdbProvider::new(
            "test_key".to_string(),
            "http://test.local/".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(provider.api_url, "http://test.local");
        assert_eq!(provider.name(), "omdb");
    }
}
