use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Match volume and success trend over a time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    #[serde(rename = "totalMatches")]
    pub total_matches: u64,
    #[serde(rename = "successfulMatches")]
    pub successful_matches: u64,
    /// Percentage, 0-100.
    #[serde(rename = "successRate")]
    pub success_rate: f64,
    #[serde(rename = "avgMatchesPerDay")]
    pub avg_matches_per_day: f64,
    #[serde(rename = "dailyCounts")]
    pub daily_counts: Vec<DailyCount>,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Per-rank engagement statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEffectiveness {
    pub rank: u32,
    pub total: u64,
    pub viewed: u64,
    pub contacted: u64,
    pub selected: u64,
    /// Percentages, 0-100.
    #[serde(rename = "viewRate")]
    pub view_rate: f64,
    #[serde(rename = "contactRate")]
    pub contact_rate: f64,
    #[serde(rename = "selectionRate")]
    pub selection_rate: f64,
}

/// How strongly the top-ranked recommendation outperforms the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    pub ranks: Vec<RankEffectiveness>,
    /// selectionRate(rank 1) / selectionRate(rank 2), 1.0 when either
    /// rank is absent.
    #[serde(rename = "topRankAdvantage")]
    pub top_rank_advantage: f64,
}

/// Success rate and satisfaction per facility, with a letter grade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityPerformance {
    #[serde(rename = "facilityId")]
    pub facility_id: String,
    #[serde(rename = "totalMatches")]
    pub total_matches: u64,
    #[serde(rename = "successfulMatches")]
    pub successful_matches: u64,
    #[serde(rename = "successRate")]
    pub success_rate: f64,
    #[serde(rename = "avgSatisfaction")]
    pub avg_satisfaction: f64,
    pub grade: String,
}

/// Success rate and satisfaction per coordinator, Korean-label banding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorPerformance {
    #[serde(rename = "coordinatorId")]
    pub coordinator_id: String,
    #[serde(rename = "totalMatches")]
    pub total_matches: u64,
    #[serde(rename = "successfulMatches")]
    pub successful_matches: u64,
    #[serde(rename = "successRate")]
    pub success_rate: f64,
    #[serde(rename = "avgSatisfaction")]
    pub avg_satisfaction: f64,
    pub grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityPerformanceReport {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    pub facilities: Vec<FacilityPerformance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorPerformanceReport {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    pub coordinators: Vec<CoordinatorPerformance>,
}

/// Where the ranking algorithm disagreed with real outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureAnalysisReport {
    #[serde(rename = "windowDays")]
    pub window_days: u32,
    /// High initial score, viewed, never selected.
    #[serde(rename = "missedOpportunities")]
    pub missed_opportunities: u64,
    /// Low initial score, contract signed anyway.
    #[serde(rename = "unexpectedSuccesses")]
    pub unexpected_successes: u64,
    /// Percentage, 100 when both counts are zero.
    #[serde(rename = "algorithmAccuracy")]
    pub algorithm_accuracy: f64,
}

/// Operational snapshot for coordinators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    #[serde(rename = "todaysMatches")]
    pub todays_matches: u64,
    #[serde(rename = "todaysSuccesses")]
    pub todays_successes: u64,
    #[serde(rename = "activeMatches")]
    pub active_matches: u64,
    #[serde(rename = "weeklySuccessRate")]
    pub weekly_success_rate: f64,
    #[serde(rename = "monthlySuccessRate")]
    pub monthly_success_rate: f64,
    /// Mean hours from creation to completion, completed records only.
    #[serde(rename = "avgCompletionHours")]
    pub avg_completion_hours: f64,
    /// IN_PROGRESS records older than 48 hours.
    #[serde(rename = "urgentActions")]
    pub urgent_actions: u64,
    /// Viewed over 24 hours ago and never contacted.
    #[serde(rename = "staleViews")]
    pub stale_views: u64,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}
