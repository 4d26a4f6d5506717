// Unit tests for CareMatch

use carematch::core::{
    analytics::success_rate,
    distance::great_circle_km,
    filters::{passes_hard_constraints, passes_preferences},
    scoring::{calculate_match_score, cost_score, grade_score},
};
use carematch::models::{
    CarePreference, Facility, FacilityGrade, HealthProfile, OperatingStatus, ScoringWeights,
    Specialization,
};

fn test_facility(id: &str, grade: FacilityGrade) -> Facility {
    Facility {
        facility_id: id.to_string(),
        name: format!("Facility {}", id),
        grade: Some(grade),
        evaluation_score: 85.0,
        facility_type: "nursing_home".to_string(),
        region: "seoul".to_string(),
        acceptable_care_grades: vec![1, 2, 3, 4],
        specializations: vec![Specialization::Hospice],
        has_resident_doctor: true,
        has_nursing_24h: true,
        nurse_count: 8,
        capacity: 50,
        current_occupancy: 30,
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

fn test_profile() -> HealthProfile {
    HealthProfile {
        user_id: "user-1".to_string(),
        care_grade_level: 1,
        ltci_grade: 1,
        mobility_level: 1,
        needs_hospice_care: true,
    }
}

#[test]
fn test_great_circle_zero_distance() {
    let d = great_circle_km(37.5665, 126.9780, 37.5665, 126.9780);
    assert!(d < 0.01);
}

#[test]
fn test_hard_filter_rejects_unaccepted_care_grade() {
    let mut facility = test_facility("f1", FacilityGrade::A);
    facility.acceptable_care_grades = vec![5, 6];
    assert!(!passes_hard_constraints(&facility, &test_profile()));
}

#[test]
fn test_hard_filter_rejects_no_beds() {
    let mut facility = test_facility("f1", FacilityGrade::A);
    facility.current_occupancy = facility.capacity;
    assert!(!passes_hard_constraints(&facility, &test_profile()));
}

#[test]
fn test_soft_filter_passes_without_preferences() {
    let facility = test_facility("f1", FacilityGrade::C);
    assert!(passes_preferences(&facility, &CarePreference::default()));
}

#[test]
fn test_grade_score_unknown_is_midpoint() {
    assert_eq!(grade_score(None), 2.5);
}

#[test]
fn test_cost_score_over_budget_band() {
    assert_eq!(cost_score(Some(400.0), Some(300.0), false), 1.0);
}

#[test]
fn test_match_score_within_valid_range() {
    let facility = test_facility("f1", FacilityGrade::A);
    let profile = test_profile();
    let preference = CarePreference {
        max_monthly_budget: Some(300.0),
        ..Default::default()
    };

    let (score, breakdown) =
        calculate_match_score(&facility, &profile, &preference, &ScoringWeights::default());

    assert!((0.0..=5.0).contains(&score), "score out of range: {}", score);
    for sub in [
        breakdown.grade,
        breakdown.specialization,
        breakdown.staffing,
        breakdown.location,
        breakdown.cost,
    ] {
        assert!((0.0..=5.0).contains(&sub));
    }
}

#[test]
fn test_better_grade_scores_higher() {
    let profile = test_profile();
    let preference = CarePreference {
        max_monthly_budget: Some(300.0),
        ..Default::default()
    };
    let weights = ScoringWeights::default();

    let (a_score, _) =
        calculate_match_score(&test_facility("a", FacilityGrade::A), &profile, &preference, &weights);
    let (d_score, _) =
        calculate_match_score(&test_facility("d", FacilityGrade::D), &profile, &preference, &weights);

    assert!(a_score > d_score);
}

#[test]
fn test_success_rate_examples() {
    assert_eq!(success_rate(0, 0), 0.0);
    assert_eq!(success_rate(3, 10), 30.0);
    assert_eq!(success_rate(10, 10), 100.0);
}
