use thiserror::Error;

use crate::core::{
    filters::{passes_hard_constraints, passes_preferences, validate_request},
    scoring::calculate_match_score,
};
use crate::models::{
    CarePreference, Facility, HealthProfile, Recommendation, ScoreBreakdown, ScoringWeights,
};

/// Domain errors raised by the matching pipeline.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result of the recommendation pipeline
#[derive(Debug)]
pub struct MatchResult {
    pub recommendations: Vec<Recommendation>,
    pub total_candidates: usize,
}

/// Recommendation assembler - runs the filter/score/rank pipeline
///
/// # Pipeline Stages
/// 1. Hard compatibility filter (care grade, beds, operating status)
/// 2. Soft preference filter (region, type, budget, grade, location)
/// 3. Per-candidate scoring
/// 4. Deterministic ranking and truncation, with explanations
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Rank facility candidates for a health profile and preference set.
    ///
    /// An empty candidate set, or one fully removed by the filters, is a
    /// valid outcome and yields an empty recommendation list.
    pub fn recommend(
        &self,
        profile: &HealthProfile,
        preference: &CarePreference,
        candidates: Vec<Facility>,
    ) -> Result<MatchResult, MatchError> {
        validate_request(profile, preference)?;

        let total_candidates = candidates.len();

        let mut scored: Vec<(Facility, f64, ScoreBreakdown)> = candidates
            .into_iter()
            .filter(|f| passes_hard_constraints(f, profile))
            .filter(|f| passes_preferences(f, preference))
            .map(|f| {
                let (score, breakdown) =
                    calculate_match_score(&f, profile, preference, &self.weights);
                (f, score, breakdown)
            })
            .collect();

        // Sort by score descending; ties break on evaluation score, then
        // facility id, so equal inputs always produce the same order.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.0.evaluation_score
                        .partial_cmp(&a.0.evaluation_score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.0.facility_id.cmp(&b.0.facility_id))
        });

        scored.truncate(preference.max_results);

        let recommendations = scored
            .into_iter()
            .enumerate()
            .map(|(i, (facility, score, breakdown))| {
                let explanation = build_explanation(&facility, &breakdown, preference);
                Recommendation {
                    facility_id: facility.facility_id,
                    facility_name: facility.name,
                    facility_type: facility.facility_type,
                    facility_grade: facility.grade,
                    rank: (i + 1) as u32,
                    match_score: score,
                    breakdown,
                    explanation,
                    estimated_monthly_cost: facility.monthly_fee,
                    available_beds: facility.capacity.saturating_sub(facility.current_occupancy),
                    evaluation_score: facility.evaluation_score,
                }
            })
            .collect();

        Ok(MatchResult {
            recommendations,
            total_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Short human-readable summary of why a facility was recommended.
fn build_explanation(
    facility: &Facility,
    breakdown: &ScoreBreakdown,
    preference: &CarePreference,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    match facility.grade {
        Some(g) => parts.push(format!("grade {} facility", g.as_str())),
        None => parts.push("ungraded facility".to_string()),
    }

    if breakdown.specialization > 2.5 {
        parts.push("specializes in the required care".to_string());
    }

    if breakdown.staffing >= 4.0 {
        parts.push("strong medical staffing".to_string());
    }

    let beds = facility.available_beds();
    parts.push(format!(
        "{} bed{} available",
        beds,
        if beds == 1 { "" } else { "s" }
    ));

    match (facility.monthly_fee, preference.max_monthly_budget) {
        (Some(fee), Some(budget)) if fee <= budget => {
            parts.push("within budget".to_string());
        }
        (Some(_), Some(_)) => parts.push("over budget".to_string()),
        _ => {}
    }

    if facility.near_subway || facility.near_hospital {
        parts.push("good accessibility".to_string());
    }

    let mut text = parts.join(", ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text
}
