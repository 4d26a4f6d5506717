use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    CoordinatorPerformance, CoordinatorPerformanceReport, DailyCount, DashboardReport,
    FacilityPerformance, FacilityPerformanceReport, FailureAnalysisReport, MatchRecord,
    MatchStatus, RankEffectiveness, RankingReport, TrendReport,
};

/// Initial score (0-100 scale) at or above which an unselected-but-viewed
/// record counts as a missed opportunity.
const MISSED_OPPORTUNITY_THRESHOLD: f64 = 80.0;
/// Initial score (0-100 scale) at or below which a signed contract counts
/// as an unexpected success.
const UNEXPECTED_SUCCESS_THRESHOLD: f64 = 60.0;

/// IN_PROGRESS records older than this need coordinator attention.
const URGENT_AGE_HOURS: i64 = 48;
/// Views older than this with no follow-up contact are stale.
const STALE_VIEW_HOURS: i64 = 24;

/// Percentage rate with a zero-denominator guard. `rate(0, 0) == 0.0`.
#[inline]
pub fn success_rate(successful: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        successful as f64 / total as f64 * 100.0
    }
}

/// Match volume and success trend over the window.
///
/// The record slice is expected to already be window-filtered by the
/// store query; an empty slice yields zero counts, never an error.
pub fn trend_report(records: &[MatchRecord], window_days: u32, now: DateTime<Utc>) -> TrendReport {
    let total = records.len() as u64;
    let successful = records.iter().filter(|r| r.is_successful_match()).count() as u64;

    let mut per_day: BTreeMap<chrono::NaiveDate, u64> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.created_at.date_naive()).or_insert(0) += 1;
    }

    let days = window_days.max(1) as f64;

    TrendReport {
        window_days,
        total_matches: total,
        successful_matches: successful,
        success_rate: success_rate(successful, total),
        avg_matches_per_day: total as f64 / days,
        daily_counts: per_day
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect(),
        generated_at: now,
    }
}

/// Per-rank view/contact/selection rates and the top-rank advantage.
pub fn ranking_report(records: &[MatchRecord], window_days: u32) -> RankingReport {
    let mut buckets: BTreeMap<u32, (u64, u64, u64, u64)> = BTreeMap::new();

    for record in records {
        let entry = buckets.entry(record.recommendation_rank).or_insert((0, 0, 0, 0));
        entry.0 += 1;
        if record.was_viewed {
            entry.1 += 1;
        }
        if record.was_contacted {
            entry.2 += 1;
        }
        if record.was_selected {
            entry.3 += 1;
        }
    }

    let ranks: Vec<RankEffectiveness> = buckets
        .into_iter()
        .map(|(rank, (total, viewed, contacted, selected))| RankEffectiveness {
            rank,
            total,
            viewed,
            contacted,
            selected,
            view_rate: success_rate(viewed, total),
            contact_rate: success_rate(contacted, total),
            selection_rate: success_rate(selected, total),
        })
        .collect();

    let selection_rate_of = |rank: u32| -> Option<f64> {
        ranks
            .iter()
            .find(|r| r.rank == rank)
            .map(|r| r.selection_rate)
    };

    // Defaults to 1.0 when either rank is absent or rank 2 never converts.
    let top_rank_advantage = match (selection_rate_of(1), selection_rate_of(2)) {
        (Some(r1), Some(r2)) if r2 > 0.0 => r1 / r2,
        _ => 1.0,
    };

    RankingReport {
        window_days,
        ranks,
        top_rank_advantage,
    }
}

/// Facility banding: success rate weighted 0.7, satisfaction (rescaled to
/// 0-100) weighted 0.3.
fn facility_grade_band(score: f64) -> &'static str {
    if score >= 90.0 {
        "A+"
    } else if score >= 80.0 {
        "A"
    } else if score >= 70.0 {
        "B+"
    } else if score >= 60.0 {
        "B"
    } else if score >= 50.0 {
        "C"
    } else {
        "D"
    }
}

/// Coordinator banding mirrors the facility scheme with 0.6/0.4 weights
/// and Korean labels.
fn coordinator_grade_band(score: f64) -> &'static str {
    if score >= 90.0 {
        "최우수"
    } else if score >= 80.0 {
        "우수"
    } else if score >= 70.0 {
        "양호"
    } else if score >= 60.0 {
        "보통"
    } else {
        "개선필요"
    }
}

struct PerfAccumulator {
    total: u64,
    successful: u64,
    satisfaction_sum: f64,
    satisfaction_n: u64,
}

impl PerfAccumulator {
    fn new() -> Self {
        Self {
            total: 0,
            successful: 0,
            satisfaction_sum: 0.0,
            satisfaction_n: 0,
        }
    }

    fn push(&mut self, record: &MatchRecord) {
        self.total += 1;
        if record.is_successful_match() {
            self.successful += 1;
        }
        if let Some(s) = record.satisfaction_score {
            self.satisfaction_sum += s;
            self.satisfaction_n += 1;
        }
    }

    fn avg_satisfaction(&self) -> f64 {
        if self.satisfaction_n == 0 {
            0.0
        } else {
            self.satisfaction_sum / self.satisfaction_n as f64
        }
    }
}

pub fn facility_performance_report(
    records: &[MatchRecord],
    window_days: u32,
) -> FacilityPerformanceReport {
    let mut by_facility: HashMap<&str, PerfAccumulator> = HashMap::new();
    for record in records {
        by_facility
            .entry(record.facility_id.as_str())
            .or_insert_with(PerfAccumulator::new)
            .push(record);
    }

    let mut facilities: Vec<FacilityPerformance> = by_facility
        .into_iter()
        .map(|(facility_id, acc)| {
            let rate = success_rate(acc.successful, acc.total);
            let satisfaction = acc.avg_satisfaction();
            let composite = rate * 0.7 + satisfaction * 20.0 * 0.3;
            FacilityPerformance {
                facility_id: facility_id.to_string(),
                total_matches: acc.total,
                successful_matches: acc.successful,
                success_rate: rate,
                avg_satisfaction: satisfaction,
                grade: facility_grade_band(composite).to_string(),
            }
        })
        .collect();

    facilities.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.facility_id.cmp(&b.facility_id))
    });

    FacilityPerformanceReport {
        window_days,
        facilities,
    }
}

pub fn coordinator_performance_report(
    records: &[MatchRecord],
    window_days: u32,
) -> CoordinatorPerformanceReport {
    let mut by_coordinator: HashMap<&str, PerfAccumulator> = HashMap::new();
    for record in records {
        if let Some(coordinator_id) = &record.coordinator_id {
            by_coordinator
                .entry(coordinator_id.as_str())
                .or_insert_with(PerfAccumulator::new)
                .push(record);
        }
    }

    let mut coordinators: Vec<CoordinatorPerformance> = by_coordinator
        .into_iter()
        .map(|(coordinator_id, acc)| {
            let rate = success_rate(acc.successful, acc.total);
            let satisfaction = acc.avg_satisfaction();
            let composite = rate * 0.6 + satisfaction * 20.0 * 0.4;
            CoordinatorPerformance {
                coordinator_id: coordinator_id.to_string(),
                total_matches: acc.total,
                successful_matches: acc.successful,
                success_rate: rate,
                avg_satisfaction: satisfaction,
                grade: coordinator_grade_band(composite).to_string(),
            }
        })
        .collect();

    coordinators.sort_by(|a, b| {
        b.success_rate
            .partial_cmp(&a.success_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.coordinator_id.cmp(&b.coordinator_id))
    });

    CoordinatorPerformanceReport {
        window_days,
        coordinators,
    }
}

/// Where the ranking disagreed with reality, and how often.
pub fn failure_analysis_report(records: &[MatchRecord], window_days: u32) -> FailureAnalysisReport {
    let missed = records
        .iter()
        .filter(|r| {
            r.initial_score >= MISSED_OPPORTUNITY_THRESHOLD && r.was_viewed && !r.was_selected
        })
        .count() as u64;

    let unexpected = records
        .iter()
        .filter(|r| r.initial_score <= UNEXPECTED_SUCCESS_THRESHOLD && r.is_successful_match())
        .count() as u64;

    let algorithm_accuracy = if missed + unexpected == 0 {
        100.0
    } else {
        (1.0 - missed.max(unexpected) as f64 / (missed + unexpected) as f64) * 100.0
    };

    FailureAnalysisReport {
        window_days,
        missed_opportunities: missed,
        unexpected_successes: unexpected,
        algorithm_accuracy,
    }
}

/// Operational dashboard over the most recent records (callers should
/// pass at least the last 30 days).
pub fn dashboard_report(records: &[MatchRecord], now: DateTime<Utc>) -> DashboardReport {
    let today = now.date_naive();
    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);
    let urgent_cutoff = now - Duration::hours(URGENT_AGE_HOURS);
    let stale_cutoff = now - Duration::hours(STALE_VIEW_HOURS);

    let todays: Vec<&MatchRecord> = records
        .iter()
        .filter(|r| r.created_at.date_naive() == today)
        .collect();
    let todays_successes = todays.iter().filter(|r| r.is_successful_match()).count() as u64;

    let weekly: Vec<&MatchRecord> = records.iter().filter(|r| r.created_at >= week_ago).collect();
    let weekly_successes = weekly.iter().filter(|r| r.is_successful_match()).count() as u64;

    let monthly: Vec<&MatchRecord> =
        records.iter().filter(|r| r.created_at >= month_ago).collect();
    let monthly_successes = monthly.iter().filter(|r| r.is_successful_match()).count() as u64;

    let mut completion_hours_sum = 0.0;
    let mut completed_n = 0u64;
    for record in records {
        if record.status == MatchStatus::Completed {
            if let Some(completed_at) = record.completed_at {
                completion_hours_sum +=
                    (completed_at - record.created_at).num_minutes() as f64 / 60.0;
                completed_n += 1;
            }
        }
    }
    let avg_completion_hours = if completed_n == 0 {
        0.0
    } else {
        completion_hours_sum / completed_n as f64
    };

    let active_matches = records
        .iter()
        .filter(|r| r.status == MatchStatus::InProgress)
        .count() as u64;

    let urgent_actions = records
        .iter()
        .filter(|r| r.status == MatchStatus::InProgress && r.created_at < urgent_cutoff)
        .count() as u64;

    let stale_views = records
        .iter()
        .filter(|r| {
            r.was_viewed
                && !r.was_contacted
                && r.viewed_at.map(|t| t < stale_cutoff).unwrap_or(false)
        })
        .count() as u64;

    DashboardReport {
        todays_matches: todays.len() as u64,
        todays_successes,
        active_matches,
        weekly_success_rate: success_rate(weekly_successes, weekly.len() as u64),
        monthly_success_rate: success_rate(monthly_successes, monthly.len() as u64),
        avg_completion_hours,
        urgent_actions,
        stale_views,
        generated_at: now,
    }
}
