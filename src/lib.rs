//! CareMatch - facility matching and recommendation engine for
//! long-term care placement.
//!
//! The library implements a filter/score/rank pipeline that turns a
//! health profile and preference set into a ranked facility list, a
//! match-lifecycle state machine that tracks what happens to each
//! recommendation, a history-based score adjuster, and read-side
//! analytics reports.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{adjust_with_history, calculate_match_score, MatchError, Matcher};
pub use models::{
    CarePreference, Facility, FacilityGrade, HealthProfile, MatchOutcome, MatchRecord,
    MatchStatus, Recommendation, ScoringWeights, Specialization,
};
