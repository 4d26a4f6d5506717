use crate::models::{
    CarePreference, Facility, FacilityGrade, HealthProfile, ScoreBreakdown, ScoringWeights,
    Specialization,
};

/// Maximum value of every sub-score and of the combined match score.
pub const MAX_SCORE: f64 = 5.0;

/// Compute the match score (0-5) for a facility against a health profile
/// and preference set.
///
/// Scoring formula:
/// score = (
///     grade_score * 0.30 +             # External quality rating
///     specialization_score * 0.25 +    # Care-need alignment
///     staffing_score * 0.20 +          # Medical staffing adequacy
///     location_score * 0.15 +          # Transit/hospital access
///     cost_score * 0.10                # Fit within budget
/// )
///
/// Each sub-score is a pure function of its inputs, so identical inputs
/// always produce identical scores.
pub fn calculate_match_score(
    facility: &Facility,
    profile: &HealthProfile,
    preference: &CarePreference,
    weights: &ScoringWeights,
) -> (f64, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        grade: grade_score(facility.grade),
        specialization: specialization_score(facility, profile),
        staffing: staffing_score(facility, profile),
        location: location_score(facility),
        cost: cost_score(
            facility.monthly_fee,
            preference.max_monthly_budget,
            facility.accepts_ltci,
        ),
    };

    let total = breakdown.grade * weights.grade
        + breakdown.specialization * weights.specialization
        + breakdown.staffing * weights.staffing
        + breakdown.location * weights.location
        + breakdown.cost * weights.cost;

    (total.clamp(0.0, MAX_SCORE), breakdown)
}

/// A=5 down to E=1; ungraded facilities score the neutral midpoint.
#[inline]
pub fn grade_score(grade: Option<FacilityGrade>) -> f64 {
    match grade {
        Some(FacilityGrade::A) => 5.0,
        Some(FacilityGrade::B) => 4.0,
        Some(FacilityGrade::C) => 3.0,
        Some(FacilityGrade::D) => 2.0,
        Some(FacilityGrade::E) => 1.0,
        None => 2.5,
    }
}

/// Bonuses for specializations that match the profile's care needs.
/// Additive and order-independent, capped at 5.0.
#[inline]
pub fn specialization_score(facility: &Facility, profile: &HealthProfile) -> f64 {
    let mut score: f64 = 2.5;

    if profile.ltci_grade == 6 && facility.specializations.contains(&Specialization::Dementia) {
        score += 2.0;
    }
    if profile.care_grade_level <= 2
        && facility.specializations.contains(&Specialization::Medical)
    {
        score += 2.0;
    }
    if profile.mobility_level >= 2
        && facility
            .specializations
            .contains(&Specialization::Rehabilitation)
    {
        score += 1.5;
    }
    if profile.needs_hospice_care && facility.specializations.contains(&Specialization::Hospice) {
        score += 2.5;
    }

    score.min(MAX_SCORE)
}

/// Staffing bonuses are need-sensitive: doctor and 24h nursing only
/// count for severe care grades.
#[inline]
pub fn staffing_score(facility: &Facility, profile: &HealthProfile) -> f64 {
    let mut score: f64 = 2.5;

    if profile.care_grade_level <= 2 {
        if facility.has_resident_doctor {
            score += 1.5;
        }
        if facility.has_nursing_24h {
            score += 1.0;
        }
    }

    // Nurse-to-occupant ratio of at least 1:10. An empty facility with
    // any nurses trivially meets it.
    let ratio_met = if facility.current_occupancy == 0 {
        facility.nurse_count > 0
    } else {
        facility.nurse_count as f64 / facility.current_occupancy as f64 >= 0.1
    };
    if ratio_met {
        score += 0.5;
    }

    score.min(MAX_SCORE)
}

/// Accessibility bonuses for nearby transit and medical services.
#[inline]
pub fn location_score(facility: &Facility) -> f64 {
    let mut score: f64 = 2.5;

    if facility.near_subway {
        score += 1.0;
    }
    if facility.near_hospital {
        score += 1.0;
    }
    if facility.near_pharmacy {
        score += 0.5;
    }

    score.min(MAX_SCORE)
}

/// Banded fee-to-budget ratio, neutral when either side is unknown.
#[inline]
pub fn cost_score(fee: Option<f64>, budget: Option<f64>, accepts_ltci: bool) -> f64 {
    let mut score: f64 = match (fee, budget) {
        (Some(fee), Some(budget)) if budget > 0.0 => {
            let ratio = fee / budget;
            if ratio <= 0.70 {
                5.0
            } else if ratio <= 0.85 {
                4.0
            } else if ratio <= 1.00 {
                3.0
            } else {
                1.0
            }
        }
        _ => 2.5,
    };

    if accepts_ltci {
        score += 0.5;
    }

    score.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperatingStatus;

    fn facility() -> Facility {
        Facility {
            facility_id: "f1".to_string(),
            name: "Evergreen Care".to_string(),
            grade: Some(FacilityGrade::A),
            evaluation_score: 95.0,
            facility_type: "nursing_home".to_string(),
            region: "seoul".to_string(),
            acceptable_care_grades: vec![1, 2, 3, 4, 5, 6],
            specializations: vec![Specialization::Hospice],
            has_resident_doctor: true,
            has_nursing_24h: true,
            nurse_count: 10,
            capacity: 80,
            current_occupancy: 60,
            monthly_fee: Some(280.0),
            latitude: 37.5665,
            longitude: 126.9780,
            near_subway: true,
            near_hospital: false,
            near_pharmacy: false,
            accepts_ltci: true,
            status: OperatingStatus::Operating,
        }
    }

    fn hospice_profile() -> HealthProfile {
        HealthProfile {
            user_id: "user-1".to_string(),
            care_grade_level: 1,
            ltci_grade: 1,
            mobility_level: 1,
            needs_hospice_care: true,
        }
    }

    #[test]
    fn test_grade_score_bands() {
        assert_eq!(grade_score(Some(FacilityGrade::A)), 5.0);
        assert_eq!(grade_score(Some(FacilityGrade::C)), 3.0);
        assert_eq!(grade_score(Some(FacilityGrade::E)), 1.0);
        assert_eq!(grade_score(None), 2.5);
    }

    #[test]
    fn test_specialization_bonuses_cap_at_five() {
        let mut f = facility();
        f.specializations = vec![
            Specialization::Dementia,
            Specialization::Medical,
            Specialization::Rehabilitation,
            Specialization::Hospice,
        ];
        let p = HealthProfile {
            user_id: "u".to_string(),
            care_grade_level: 1,
            ltci_grade: 6,
            mobility_level: 3,
            needs_hospice_care: true,
        };
        // 2.5 + 2.0 + 2.0 + 1.5 + 2.5 would be 10.5 uncapped
        assert_eq!(specialization_score(&f, &p), 5.0);
    }

    #[test]
    fn test_specialization_no_matching_needs() {
        let mut f = facility();
        f.specializations = vec![Specialization::Dementia];
        let p = HealthProfile {
            user_id: "u".to_string(),
            care_grade_level: 4,
            ltci_grade: 2,
            mobility_level: 1,
            needs_hospice_care: false,
        };
        assert_eq!(specialization_score(&f, &p), 2.5);
    }

    #[test]
    fn test_staffing_bonuses_require_severe_grade() {
        let f = facility();
        let mild = HealthProfile {
            user_id: "u".to_string(),
            care_grade_level: 4,
            ltci_grade: 4,
            mobility_level: 1,
            needs_hospice_care: false,
        };
        // Only the nurse-ratio bonus applies (10 nurses / 60 occupants > 0.1)
        assert_eq!(staffing_score(&f, &mild), 3.0);

        let severe = hospice_profile();
        // 2.5 + 1.5 + 1.0 + 0.5 capped at 5.0
        assert_eq!(staffing_score(&f, &severe), 5.0);
    }

    #[test]
    fn test_nurse_ratio_boundary() {
        let mut f = facility();
        f.nurse_count = 5;
        f.current_occupancy = 50;
        let p = HealthProfile {
            user_id: "u".to_string(),
            care_grade_level: 4,
            ltci_grade: 4,
            mobility_level: 1,
            needs_hospice_care: false,
        };
        assert_eq!(staffing_score(&f, &p), 3.0);

        f.nurse_count = 4;
        assert_eq!(staffing_score(&f, &p), 2.5);
    }

    #[test]
    fn test_location_score_accumulates() {
        let mut f = facility();
        assert_eq!(location_score(&f), 3.5);

        f.near_hospital = true;
        f.near_pharmacy = true;
        assert_eq!(location_score(&f), 5.0);
    }

    #[test]
    fn test_cost_score_bands() {
        assert_eq!(cost_score(Some(200.0), Some(300.0), false), 5.0);
        assert_eq!(cost_score(Some(250.0), Some(300.0), false), 4.0);
        assert_eq!(cost_score(Some(290.0), Some(300.0), false), 3.0);
        assert_eq!(cost_score(Some(350.0), Some(300.0), false), 1.0);
    }

    #[test]
    fn test_cost_score_unknown_is_neutral() {
        assert_eq!(cost_score(None, Some(300.0), false), 2.5);
        assert_eq!(cost_score(Some(250.0), None, false), 2.5);
        assert_eq!(cost_score(None, None, true), 3.0);
    }

    #[test]
    fn test_cost_score_insurance_bonus_caps() {
        assert_eq!(cost_score(Some(100.0), Some(300.0), true), 5.0);
        assert_eq!(cost_score(Some(290.0), Some(300.0), true), 3.5);
    }

    #[test]
    fn test_sub_scores_within_range() {
        let f = facility();
        let p = hospice_profile();
        let pref = CarePreference {
            max_monthly_budget: Some(300.0),
            ..Default::default()
        };
        let (score, b) = calculate_match_score(&f, &p, &pref, &ScoringWeights::default());

        for sub in [b.grade, b.specialization, b.staffing, b.location, b.cost] {
            assert!((0.0..=5.0).contains(&sub), "sub-score out of range: {}", sub);
        }
        assert!((0.0..=5.0).contains(&score));
    }

    #[test]
    fn test_worked_example() {
        // Grade A, hospice specialization, doctor + 24h nursing, near
        // subway, fee 280 against budget 300, insurance accepted.
        let f = facility();
        let p = hospice_profile();
        let pref = CarePreference {
            max_monthly_budget: Some(300.0),
            ..Default::default()
        };

        let (score, b) = calculate_match_score(&f, &p, &pref, &ScoringWeights::default());

        assert_eq!(b.grade, 5.0);
        assert_eq!(b.specialization, 5.0); // 2.5 + 2.5 hospice
        assert_eq!(b.staffing, 5.0); // 2.5 + 1.5 + 1.0 + 0.5 capped
        assert_eq!(b.location, 3.5); // 2.5 + 1.0 subway
        assert_eq!(b.cost, 3.5); // ratio 0.93 -> 3.0, +0.5 insurance

        // 5*.3 + 5*.25 + 5*.2 + 3.5*.15 + 3.5*.1 = 4.625
        assert!((score - 4.625).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let f = facility();
        let p = hospice_profile();
        let pref = CarePreference {
            max_monthly_budget: Some(300.0),
            ..Default::default()
        };
        let w = ScoringWeights::default();

        let (a, _) = calculate_match_score(&f, &p, &pref, &w);
        let (b, _) = calculate_match_score(&f, &p, &pref, &w);
        assert_eq!(a, b);
    }
}
