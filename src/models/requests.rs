use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::CarePreference;

/// Request to compute recommendations for a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(alias = "coordinatorId", rename = "coordinatorId", default)]
    pub coordinator_id: Option<String>,
    #[serde(default)]
    pub preference: CarePreference,
    /// Re-weight the ranking with the user's successful-match history.
    #[serde(alias = "applyLearning", rename = "applyLearning", default)]
    pub apply_learning: bool,
}

/// Request to record a tracking action against the user's most recent
/// match record for a facility.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordActionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "facilityId", rename = "facilityId")]
    pub facility_id: String,
    /// One of: viewed, contacted, visited.
    #[serde(alias = "actionType", rename = "actionType")]
    pub action_type: String,
}

/// Request to finish a match with an outcome.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "facilityId", rename = "facilityId")]
    pub facility_id: String,
    pub outcome: crate::models::MatchOutcome,
    #[serde(alias = "actualCost", rename = "actualCost", default)]
    pub actual_cost: Option<f64>,
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(alias = "satisfactionScore", rename = "satisfactionScore", default)]
    pub satisfaction_score: Option<f64>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Window selector for report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReportQuery {
    #[validate(range(min = 1, max = 365))]
    #[serde(default = "default_window_days")]
    pub days: u32,
}

fn default_window_days() -> u32 {
    30
}
