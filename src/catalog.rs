use serde::Deserialize;
use thiserror::Error;

/// A game returned by a catalog search.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub genres: Vec<String>,
}

/// Errors from a catalog search call.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("catalog service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected response shape: {0}")]
    Payload(serde_json::Error),
}

impl CatalogError {
    /// Status-line friendly message.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Network(_) => "Search failed: catalog unreachable".to_string(),
            CatalogError::Status(status) => format!("Search failed: catalog returned {}", status),
            CatalogError::Payload(_) => "Search failed: catalog sent an unexpected response".to_string(),
        }
    }
}

// ── Wire types ──
// The catalog responds with { "results": [ { id, name, background_image?, genres: [{name}] } ] }.
// Anything else is a payload error.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<WireEntry>,
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    id: i64,
    name: String,
    background_image: Option<String>,
    genres: Vec<WireGenre>,
}

#[derive(Debug, Deserialize)]
struct WireGenre {
    name: String,
}

impl From<WireEntry> for CatalogEntry {
    fn from(wire: WireEntry) -> Self {
        CatalogEntry {
            id: wire.id,
            name: wire.name,
            image_url: wire.background_image,
            genres: wire.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

/// HTTP client for the game catalog search endpoint.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl CatalogClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        CatalogClient {
            http: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Search the catalog by name. Issues exactly one GET per call;
    /// blank queries never hit the network and return an empty list.
    ///
    /// An empty `results` array is a successful search with no matches,
    /// not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .get(&self.api_url)
            .query(&[("key", self.api_key.as_str()), ("search", query)])
            .send()
            .await
            .map_err(CatalogError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await.map_err(CatalogError::Network)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(CatalogError::Payload)?;

        Ok(parsed.results.into_iter().map(CatalogEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let body = r#"{
            "results": [
                {
                    "id": 4200,
                    "name": "Portal 2",
                    "background_image": "https://media.example/portal2.jpg",
                    "genres": [{"name": "Shooter"}, {"name": "Puzzle"}]
                }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let entries: Vec<CatalogEntry> = parsed.results.into_iter().map(CatalogEntry::from).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 4200);
        assert_eq!(entries[0].name, "Portal 2");
        assert_eq!(
            entries[0].image_url.as_deref(),
            Some("https://media.example/portal2.jpg")
        );
        assert_eq!(entries[0].genres, vec!["Shooter", "Puzzle"]);
    }

    #[test]
    fn test_parse_missing_image_is_ok() {
        let body = r#"{"results": [{"id": 1, "name": "Portal 2", "genres": [{"name": "Puzzle"}]}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let entry = CatalogEntry::from(parsed.results.into_iter().next().unwrap());
        assert!(entry.image_url.is_none());
    }

    #[test]
    fn test_parse_empty_results_is_ok() {
        let body = r#"{"results": []}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn test_parse_wrong_shape_fails() {
        // No `results` key at all
        assert!(serde_json::from_str::<SearchResponse>(r#"{"detail": "rate limited"}"#).is_err());
        // Entry missing required fields
        assert!(serde_json::from_str::<SearchResponse>(r#"{"results": [{"id": 1}]}"#).is_err());
        // Genres of the wrong shape
        assert!(
            serde_json::from_str::<SearchResponse>(
                r#"{"results": [{"id": 1, "name": "x", "genres": ["Puzzle"]}]}"#
            )
            .is_err()
        );
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        // Must not touch the network, so an unroutable URL is safe here.
        let client = CatalogClient::new(
            "http://127.0.0.1:0/api/games".to_string(),
            "test-key".to_string(),
        );
        assert!(client.search("").await.unwrap().is_empty());
        assert!(client.search("   \t ").await.unwrap().is_empty());
    }

    #[test]
    fn test_user_messages() {
        let err = CatalogError::Status(reqwest::StatusCode::UNAUTHORIZED);
        assert!(err.user_message().contains("401"));

        let bad_json: serde_json::Error =
            serde_json::from_str::<SearchResponse>("not json").unwrap_err();
        let err = CatalogError::Payload(bad_json);
        assert!(err.user_message().contains("unexpected response"));
    }
}
