use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::FacilityGrade;

/// Lifecycle state of a match record.
///
/// `Pending -> InProgress -> {Completed | Failed}`, with `Cancelled`
/// reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "match_status", rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MatchStatus::Completed | MatchStatus::Failed | MatchStatus::Cancelled
        )
    }
}

/// Terminal outcome of a match, set when the user selects (or rejects)
/// a recommended facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "match_outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    ContractSigned,
    UserRejected,
    FacilityRejected,
    BetterOptionFound,
    BudgetExceeded,
    LocationIssue,
    ServiceMismatch,
    Other,
}

/// One persisted record per (user, facility, recommendation batch) pair.
///
/// Action flags are monotonic: once set they are never reset. Tracking
/// timestamps track the latest invocation of each action; status never
/// regresses from a more advanced state, and terminal decisions are
/// frozen once made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "facilityId")]
    pub facility_id: String,
    #[serde(rename = "coordinatorId")]
    pub coordinator_id: Option<String>,
    /// Persisted on the 0-100 scale (live match score x 20).
    #[serde(rename = "initialScore")]
    pub initial_score: f64,
    /// Position within the recommendation batch, 1-based.
    #[serde(rename = "recommendationRank")]
    pub recommendation_rank: u32,
    pub status: MatchStatus,
    pub outcome: Option<MatchOutcome>,
    #[serde(rename = "wasViewed")]
    pub was_viewed: bool,
    #[serde(rename = "viewedAt")]
    pub viewed_at: Option<DateTime<Utc>>,
    #[serde(rename = "wasContacted")]
    pub was_contacted: bool,
    #[serde(rename = "contactedAt")]
    pub contacted_at: Option<DateTime<Utc>>,
    #[serde(rename = "wasVisited")]
    pub was_visited: bool,
    #[serde(rename = "visitedAt")]
    pub visited_at: Option<DateTime<Utc>>,
    #[serde(rename = "wasSelected")]
    pub was_selected: bool,
    #[serde(rename = "selectedAt")]
    pub selected_at: Option<DateTime<Utc>>,
    /// 1.0-5.0 when set.
    #[serde(rename = "satisfactionScore")]
    pub satisfaction_score: Option<f64>,
    pub feedback: Option<String>,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: Option<f64>,
    #[serde(rename = "actualCost")]
    pub actual_cost: Option<f64>,
    /// Denormalized from the facility at recommendation time, for the
    /// learning adjuster. The snapshots below stay opaque.
    #[serde(rename = "facilityType")]
    pub facility_type: Option<String>,
    #[serde(rename = "facilityGrade")]
    pub facility_grade: Option<FacilityGrade>,
    /// Opaque serialized request criteria, kept for audit/replay.
    pub criteria: Value,
    /// Opaque serialized facility snapshot, kept for audit/replay.
    pub facility: Value,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Optimistic-lock version, bumped by the store on every write.
    pub version: i64,
}

impl MatchRecord {
    /// New record in `Pending` state, as created when a recommendation
    /// batch is persisted.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: &str,
        facility_id: &str,
        coordinator_id: Option<&str>,
        initial_score: f64,
        recommendation_rank: u32,
        criteria: Value,
        facility: Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            facility_id: facility_id.to_string(),
            coordinator_id: coordinator_id.map(str::to_string),
            initial_score,
            recommendation_rank,
            status: MatchStatus::Pending,
            outcome: None,
            was_viewed: false,
            viewed_at: None,
            was_contacted: false,
            contacted_at: None,
            was_visited: false,
            visited_at: None,
            was_selected: false,
            selected_at: None,
            satisfaction_score: None,
            feedback: None,
            estimated_cost: None,
            actual_cost: None,
            facility_type: None,
            facility_grade: None,
            criteria,
            facility,
            created_at: now,
            completed_at: None,
            version: 0,
        }
    }

    /// The user opened the recommendation. Advances `Pending` to
    /// `InProgress`; idempotent otherwise.
    pub fn mark_viewed(&mut self, now: DateTime<Utc>) {
        self.was_viewed = true;
        self.viewed_at = Some(now);
        if self.status == MatchStatus::Pending {
            self.status = MatchStatus::InProgress;
        }
    }

    /// The user contacted the facility. Forces `InProgress` from any
    /// non-terminal state.
    pub fn mark_contacted(&mut self, now: DateTime<Utc>) {
        self.was_contacted = true;
        self.contacted_at = Some(now);
        if !self.status.is_terminal() {
            self.status = MatchStatus::InProgress;
        }
    }

    /// The user visited the facility. Forces `InProgress` from any
    /// non-terminal state.
    pub fn mark_visited(&mut self, now: DateTime<Utc>) {
        self.was_visited = true;
        self.visited_at = Some(now);
        if !self.status.is_terminal() {
            self.status = MatchStatus::InProgress;
        }
    }

    /// The user made a decision. `ContractSigned` completes the match,
    /// every other outcome fails it. The first decision wins: once the
    /// record is terminal, later decisions are ignored.
    pub fn mark_selected(&mut self, outcome: MatchOutcome, now: DateTime<Utc>) {
        if self.status.is_terminal() {
            return;
        }
        self.was_selected = true;
        self.selected_at = Some(now);
        self.outcome = Some(outcome);
        if outcome == MatchOutcome::ContractSigned {
            self.status = MatchStatus::Completed;
            self.completed_at = Some(now);
        } else {
            self.status = MatchStatus::Failed;
        }
    }

    /// Shortcut used when contract confirmation arrives directly,
    /// bypassing the intermediate action sequence. Ignored once the
    /// record is terminal.
    pub fn mark_contracted(&mut self, now: DateTime<Utc>) {
        if self.status.is_terminal() {
            return;
        }
        self.was_selected = true;
        self.selected_at = Some(now);
        self.outcome = Some(MatchOutcome::ContractSigned);
        self.status = MatchStatus::Completed;
        self.completed_at = Some(now);
    }

    /// Cancels a match that has not yet reached a terminal state.
    pub fn cancel(&mut self) {
        if !self.status.is_terminal() {
            self.status = MatchStatus::Cancelled;
        }
    }

    pub fn is_successful_match(&self) -> bool {
        self.status == MatchStatus::Completed && self.outcome == Some(MatchOutcome::ContractSigned)
    }

    /// 25% per action taken, 0-100.
    pub fn progress_percent(&self) -> u8 {
        let steps = [
            self.was_viewed,
            self.was_contacted,
            self.was_visited,
            self.was_selected,
        ];
        25 * steps.iter().filter(|&&s| s).count() as u8
    }
}
