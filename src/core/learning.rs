use std::collections::HashMap;

use crate::core::scoring::MAX_SCORE;
use crate::models::{FacilityGrade, MatchRecord, Recommendation};

/// Weight of the facility-type affinity term.
const TYPE_WEIGHT: f64 = 0.20;
/// Weight of the facility-grade affinity term.
const GRADE_WEIGHT: f64 = 0.15;
/// Weight of the cost-similarity term.
const COST_WEIGHT: f64 = 0.10;

/// Re-weight a freshly assembled recommendation list using the user's own
/// successful-match history.
///
/// This is a deterministic frequency/affinity adjustment, not a trained
/// model. Each recommendation's score is multiplied by
/// `1 + 0.20*typeAffinity + 0.15*gradeAffinity + 0.10*costFit`, capped at
/// the scale maximum, and the list is re-sorted and re-ranked.
///
/// The history is read-only here; an empty history, or one without any
/// successful matches, returns the input unchanged. Missing grade or cost
/// data degrades the corresponding term to neutral instead of failing.
pub fn adjust_with_history(
    mut recommendations: Vec<Recommendation>,
    history: &[MatchRecord],
) -> Vec<Recommendation> {
    if history.is_empty() {
        return recommendations;
    }

    let successes: Vec<&MatchRecord> = history
        .iter()
        .filter(|r| r.is_successful_match())
        .collect();
    if successes.is_empty() {
        return recommendations;
    }

    let n = successes.len() as f64;

    let mut type_counts: HashMap<&str, f64> = HashMap::new();
    let mut grade_counts: HashMap<FacilityGrade, f64> = HashMap::new();
    let mut cost_sum = 0.0;
    let mut cost_n = 0u32;

    for record in &successes {
        if let Some(ft) = &record.facility_type {
            *type_counts.entry(ft.as_str()).or_insert(0.0) += 1.0;
        }
        if let Some(grade) = record.facility_grade {
            *grade_counts.entry(grade).or_insert(0.0) += 1.0;
        }
        if let Some(cost) = record.actual_cost {
            cost_sum += cost;
            cost_n += 1;
        }
    }

    let avg_success_cost = if cost_n > 0 {
        Some(cost_sum / cost_n as f64)
    } else {
        None
    };

    for rec in &mut recommendations {
        let type_affinity = type_counts
            .get(rec.facility_type.as_str())
            .map(|c| c / n)
            .unwrap_or(0.0);

        let grade_affinity = rec
            .facility_grade
            .and_then(|g| grade_counts.get(&g))
            .map(|c| c / n)
            .unwrap_or(0.0);

        let cost_fit = match (rec.estimated_monthly_cost, avg_success_cost) {
            (Some(fee), Some(avg)) if avg > 0.0 => (1.0 - (fee - avg).abs() / avg).max(0.0),
            _ => 0.0,
        };

        let factor =
            1.0 + TYPE_WEIGHT * type_affinity + GRADE_WEIGHT * grade_affinity + COST_WEIGHT * cost_fit;
        rec.match_score = (rec.match_score * factor).min(MAX_SCORE);
    }

    // Re-sort with the assembler's tie-break so the order stays deterministic.
    recommendations.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.evaluation_score
                    .partial_cmp(&a.evaluation_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.facility_id.cmp(&b.facility_id))
    });

    for (i, rec) in recommendations.iter_mut().enumerate() {
        rec.rank = (i + 1) as u32;
    }

    recommendations
}
