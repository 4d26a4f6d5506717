use serde::{Deserialize, Serialize};

use crate::models::domain::Recommendation;

/// Response for the recommendation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "learningApplied")]
    pub learning_applied: bool,
}

/// Response for tracking-action endpoints.
///
/// `matched` is false when no prior match record existed for the
/// (user, facility) pair; the action is then a best-effort no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub matched: bool,
    pub status: Option<crate::models::MatchStatus>,
    #[serde(rename = "progressPercent")]
    pub progress_percent: Option<u8>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
