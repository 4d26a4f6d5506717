// Core algorithm exports
pub mod analytics;
pub mod distance;
pub mod filters;
pub mod learning;
pub mod matcher;
pub mod scoring;

pub use distance::{great_circle_km, within_radius};
pub use filters::{passes_hard_constraints, passes_preferences, validate_request};
pub use learning::adjust_with_history;
pub use matcher::{MatchError, MatchResult, Matcher};
pub use scoring::{calculate_match_score, MAX_SCORE};
