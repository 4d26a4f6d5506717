// Model exports
pub mod domain;
pub mod history;
pub mod reports;
pub mod requests;
pub mod responses;

pub use domain::{
    CarePreference, Facility, FacilityGrade, HealthProfile, LocationBias, OperatingStatus,
    Recommendation, ScoreBreakdown, ScoringWeights, Specialization,
};
pub use history::{MatchOutcome, MatchRecord, MatchStatus};
pub use reports::{
    CoordinatorPerformance, CoordinatorPerformanceReport, DailyCount, DashboardReport,
    FacilityPerformance, FacilityPerformanceReport, FailureAnalysisReport, RankEffectiveness,
    RankingReport, TrendReport,
};
pub use requests::{CompleteMatchRequest, RecommendRequest, RecordActionRequest, ReportQuery};
pub use responses::{ActionResponse, ErrorResponse, HealthResponse, RecommendResponse};
