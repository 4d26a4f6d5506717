// Integration tests for CareMatch
//
// Exercise the full pipeline: candidate filtering, scoring, ranking,
// learning adjustment, the match lifecycle, and analytics over the
// resulting history.

use carematch::core::{adjust_with_history, analytics, Matcher};
use carematch::models::{
    CarePreference, Facility, FacilityGrade, HealthProfile, MatchOutcome, MatchRecord,
    OperatingStatus, Specialization,
};
use chrono::{Duration, Utc};
use serde_json::Value;

fn candidate(id: &str, grade: FacilityGrade, facility_type: &str, fee: f64) -> Facility {
    Facility {
        facility_id: id.to_string(),
        name: format!("Facility {}", id),
        grade: Some(grade),
        evaluation_score: 80.0,
        facility_type: facility_type.to_string(),
        region: "seoul".to_string(),
        acceptable_care_grades: vec![1, 2, 3, 4, 5, 6],
        specializations: vec![Specialization::Medical, Specialization::Rehabilitation],
        has_resident_doctor: true,
        has_nursing_24h: true,
        nurse_count: 10,
        capacity: 60,
        current_occupancy: 40,
        monthly_fee: Some(fee),
        latitude: 37.5665,
        longitude: 126.9780,
        near_subway: true,
        near_hospital: true,
        near_pharmacy: true,
        accepts_ltci: true,
        status: OperatingStatus::Operating,
    }
}

fn profile() -> HealthProfile {
    HealthProfile {
        user_id: "user-1".to_string(),
        care_grade_level: 2,
        ltci_grade: 2,
        mobility_level: 2,
        needs_hospice_care: false,
    }
}

#[test]
fn test_end_to_end_recommendation_pipeline() {
    let matcher = Matcher::with_default_weights();
    let preference = CarePreference {
        preferred_regions: vec!["seoul".to_string()],
        max_monthly_budget: Some(300.0),
        max_results: 3,
        ..Default::default()
    };

    let mut closed = candidate("closed", FacilityGrade::A, "nursing_home", 200.0);
    closed.status = OperatingStatus::Closed;
    let mut wrong_region = candidate("busan", FacilityGrade::A, "nursing_home", 200.0);
    wrong_region.region = "busan".to_string();
    let mut over_budget = candidate("pricey", FacilityGrade::A, "nursing_home", 500.0);
    over_budget.monthly_fee = Some(500.0);

    let candidates = vec![
        candidate("a", FacilityGrade::A, "nursing_home", 200.0),
        candidate("b", FacilityGrade::B, "nursing_home", 210.0),
        candidate("c", FacilityGrade::C, "group_home", 180.0),
        candidate("d", FacilityGrade::D, "nursing_home", 190.0),
        closed,
        wrong_region,
        over_budget,
    ];

    let result = matcher.recommend(&profile(), &preference, candidates).unwrap();

    assert_eq!(result.total_candidates, 7);
    assert_eq!(result.recommendations.len(), 3);
    assert_eq!(result.recommendations[0].facility_id, "a");

    for pair in result.recommendations.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
    for rec in &result.recommendations {
        assert!(!rec.explanation.is_empty());
        assert!((0.0..=5.0).contains(&rec.match_score));
    }
}

#[test]
fn test_learning_reorders_toward_successful_history() {
    let matcher = Matcher::with_default_weights();
    let preference = CarePreference {
        max_monthly_budget: Some(300.0),
        ..Default::default()
    };

    // Two equally attractive mid-tier facilities of different types.
    // Stripped of staffing and location bonuses so the adjusted scores
    // stay below the 5.0 ceiling.
    let mut gh = candidate("gh", FacilityGrade::C, "group_home", 200.0);
    let mut nh = candidate("nh", FacilityGrade::C, "nursing_home", 200.0);
    for f in [&mut gh, &mut nh] {
        f.has_resident_doctor = false;
        f.has_nursing_24h = false;
        f.near_subway = false;
        f.near_hospital = false;
        f.near_pharmacy = false;
        f.specializations = vec![];
    }

    let result = matcher
        .recommend(&profile(), &preference, vec![gh, nh])
        .unwrap();
    // Tied scores, so the id tie-break puts "gh" first already.
    assert_eq!(result.recommendations[0].facility_id, "gh");
    assert!(
        (result.recommendations[0].match_score - result.recommendations[1].match_score).abs()
            < 1e-9
    );

    // History: the user signed a contract with a group home before.
    let mut past = MatchRecord::new(
        "user-1",
        "old-gh",
        None,
        90.0,
        1,
        Value::Null,
        Value::Null,
        Utc::now() - Duration::days(60),
    );
    past.facility_type = Some("group_home".to_string());
    past.facility_grade = Some(FacilityGrade::C);
    past.actual_cost = Some(200.0);
    past.mark_selected(MatchOutcome::ContractSigned, Utc::now() - Duration::days(30));

    let adjusted = adjust_with_history(result.recommendations, &[past]);

    // Type affinity only favors the group home; grade and cost terms
    // apply to both, so the gap is exactly the type weight.
    assert_eq!(adjusted[0].facility_id, "gh");
    assert_eq!(adjusted[0].rank, 1);
    assert!(adjusted[0].match_score > adjusted[1].match_score);
}

#[test]
fn test_lifecycle_feeds_analytics() {
    let now = Utc::now();
    let mut records = Vec::new();

    // A batch of three recommendations created 50 hours ago, past the
    // 48-hour urgency cutoff.
    let created = now - Duration::hours(50);
    for rank in 1..=3 {
        let mut r = MatchRecord::new(
            "user-1",
            &format!("facility-{}", rank),
            Some("coord-1"),
            95.0 - rank as f64 * 10.0,
            rank,
            Value::Null,
            Value::Null,
            created,
        );
        r.mark_viewed(created + Duration::hours(1));
        records.push(r);
    }

    // The user contacted and signed with the top recommendation.
    records[0].mark_contacted(created + Duration::hours(2));
    records[0].satisfaction_score = Some(4.5);
    records[0].mark_selected(MatchOutcome::ContractSigned, created + Duration::hours(20));

    // Rank 2 was contacted but ended in rejection; rank 3 is still in
    // progress and old enough to be urgent.
    records[1].mark_contacted(created + Duration::hours(3));
    records[1].mark_selected(MatchOutcome::UserRejected, created + Duration::hours(30));

    let trend = analytics::trend_report(&records, 30, now);
    assert_eq!(trend.total_matches, 3);
    assert_eq!(trend.successful_matches, 1);
    assert!((trend.success_rate - 100.0 / 3.0).abs() < 1e-9);

    let ranking = analytics::ranking_report(&records, 30);
    assert_eq!(ranking.ranks.len(), 3);
    assert_eq!(ranking.ranks[0].selection_rate, 100.0);
    // Rank 2 was selected too (rejected counts as a selection action).
    assert!((ranking.top_rank_advantage - 1.0).abs() < 1e-9);

    let facilities = analytics::facility_performance_report(&records, 30);
    assert_eq!(facilities.facilities.len(), 3);
    assert_eq!(facilities.facilities[0].facility_id, "facility-1");
    assert_eq!(facilities.facilities[0].success_rate, 100.0);

    let coordinators = analytics::coordinator_performance_report(&records, 30);
    assert_eq!(coordinators.coordinators.len(), 1);
    assert_eq!(coordinators.coordinators[0].total_matches, 3);

    let dashboard = analytics::dashboard_report(&records, now);
    assert_eq!(dashboard.active_matches, 1);
    assert_eq!(dashboard.urgent_actions, 1); // rank 3, 48h+ in progress
    assert_eq!(dashboard.stale_views, 1); // rank 3 viewed, never contacted
    assert!((dashboard.avg_completion_hours - 20.0).abs() < 0.1);
}

#[test]
fn test_failure_analysis_over_lifecycle() {
    let now = Utc::now();

    // High-scored recommendation the user viewed but walked away from.
    let mut missed = MatchRecord::new(
        "user-1", "f-high", None, 88.0, 1, Value::Null, Value::Null, now,
    );
    missed.mark_viewed(now);

    // Low-scored recommendation that still ended in a contract.
    let mut surprise = MatchRecord::new(
        "user-2", "f-low", None, 52.0, 5, Value::Null, Value::Null, now,
    );
    surprise.mark_contracted(now);

    let report = analytics::failure_analysis_report(&[missed, surprise], 30);
    assert_eq!(report.missed_opportunities, 1);
    assert_eq!(report.unexpected_successes, 1);
    assert_eq!(report.algorithm_accuracy, 50.0);
}

#[test]
fn test_empty_candidates_and_empty_history() {
    let matcher = Matcher::with_default_weights();
    let result = matcher
        .recommend(&profile(), &CarePreference::default(), vec![])
        .unwrap();
    assert!(result.recommendations.is_empty());

    let adjusted = adjust_with_history(vec![], &[]);
    assert!(adjusted.is_empty());

    let trend = analytics::trend_report(&[], 7, Utc::now());
    assert_eq!(trend.success_rate, 0.0);
}
