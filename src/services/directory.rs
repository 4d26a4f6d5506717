use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Facility, HealthProfile};

/// Errors that can occur when talking to the facility directory or the
/// health assessment provider.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the external facility directory service.
///
/// The directory owns facility records and health assessments; this
/// client only performs the two lookups the matching core consumes:
/// - candidate facilities filterable by acceptable care grade
/// - a user's health assessment profile
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DirectoryClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    /// Fetch facility candidates that accept the given care grade.
    pub async fn find_candidates(&self, care_grade: u8) -> Result<Vec<Facility>, DirectoryError> {
        let url = format!(
            "{}/facilities?careGrade={}",
            self.base_url.trim_end_matches('/'),
            care_grade
        );

        tracing::debug!("Fetching facility candidates from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to query facilities: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("facilities")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing facilities array".into()))?;

        // Skip malformed entries rather than failing the whole lookup.
        let facilities: Vec<Facility> = documents
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        tracing::debug!(
            "Directory returned {} candidates for care grade {}",
            facilities.len(),
            care_grade
        );

        Ok(facilities)
    }

    /// Fetch the health assessment profile for a user.
    pub async fn get_health_profile(&self, user_id: &str) -> Result<HealthProfile, DirectoryError> {
        let url = format!(
            "{}/assessments/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching health profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(format!(
                "No health profile for user {}",
                user_id
            )));
        }

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch health profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        serde_json::from_value(json).map_err(|e| {
            DirectoryError::InvalidResponse(format!("Failed to parse health profile: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_candidates_parses_listing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/facilities?careGrade=2")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "total": 1,
                    "facilities": [{
                        "facilityId": "f1",
                        "name": "Hana Care Center",
                        "grade": "A",
                        "evaluationScore": 91.0,
                        "facilityType": "nursing_home",
                        "region": "seoul",
                        "acceptableCareGrades": [1, 2, 3],
                        "specializations": ["medical"],
                        "capacity": 60,
                        "currentOccupancy": 40,
                        "monthlyFee": 250.0,
                        "latitude": 37.5665,
                        "longitude": 126.978,
                        "status": "operating"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url(), "test-key".to_string());
        let facilities = client.find_candidates(2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].facility_id, "f1");
        assert_eq!(facilities[0].available_beds(), 20);
    }

    #[tokio::test]
    async fn test_get_health_profile_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/assessments/nobody")
            .with_status(404)
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url(), "test-key".to_string());
        let err = client.get_health_profile("nobody").await.unwrap_err();

        assert!(matches!(err, DirectoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_facility_entries_are_skipped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/facilities?careGrade=1")
            .with_status(200)
            .with_body(r#"{"facilities": [{"bogus": true}]}"#)
            .create_async()
            .await;

        let client = DirectoryClient::new(server.url(), "test-key".to_string());
        let facilities = client.find_candidates(1).await.unwrap();
        assert!(facilities.is_empty());
    }
}
