use crate::core::distance::within_radius;
use crate::core::matcher::MatchError;
use crate::models::{CarePreference, Facility, HealthProfile, OperatingStatus};

/// Maximum accepted location-bias radius, in kilometers.
pub const MAX_RADIUS_KM: f64 = 100.0;

/// Validate caller input before any filtering runs.
///
/// Invalid input is rejected up front so no partial computation is
/// performed on a bad request.
pub fn validate_request(
    profile: &HealthProfile,
    preference: &CarePreference,
) -> Result<(), MatchError> {
    if !(1..=6).contains(&profile.care_grade_level) {
        return Err(MatchError::InvalidInput(format!(
            "care grade level must be 1-6, got {}",
            profile.care_grade_level
        )));
    }

    if let Some(budget) = preference.max_monthly_budget {
        if budget <= 0.0 {
            return Err(MatchError::InvalidInput(format!(
                "max monthly budget must be positive, got {}",
                budget
            )));
        }
    }

    if let Some(bias) = &preference.location_bias {
        if bias.radius_km <= 0.0 || bias.radius_km > MAX_RADIUS_KM {
            return Err(MatchError::InvalidInput(format!(
                "location radius must be in (0, {}] km, got {}",
                MAX_RADIUS_KM, bias.radius_km
            )));
        }
    }

    if preference.preferred_regions.iter().any(|r| r.is_empty()) {
        return Err(MatchError::InvalidInput(
            "preferred regions must not contain empty names".to_string(),
        ));
    }

    Ok(())
}

/// Hard compatibility rules; all must pass.
///
/// A facility survives when it accepts the profile's care grade, has at
/// least one open bed, and is currently operating.
#[inline]
pub fn passes_hard_constraints(facility: &Facility, profile: &HealthProfile) -> bool {
    if facility.status != OperatingStatus::Operating {
        return false;
    }

    if facility.available_beds() == 0 {
        return false;
    }

    facility
        .acceptable_care_grades
        .contains(&profile.care_grade_level)
}

/// Soft preference rules; each is applied only when the caller supplied it.
#[inline]
pub fn passes_preferences(facility: &Facility, preference: &CarePreference) -> bool {
    if !preference.preferred_regions.is_empty()
        && !preference.preferred_regions.contains(&facility.region)
    {
        return false;
    }

    if !preference.preferred_types.is_empty()
        && !preference.preferred_types.contains(&facility.facility_type)
    {
        return false;
    }

    if let (Some(budget), Some(fee)) = (preference.max_monthly_budget, facility.monthly_fee) {
        if fee > budget {
            return false;
        }
    }

    // Grade ceiling: A (ordinal 1) is best, so a facility must rate at or
    // above the requested minimum. Ungraded facilities fail the check.
    if let Some(min_grade) = preference.min_facility_grade {
        match facility.grade {
            Some(grade) if grade.ordinal() <= min_grade.ordinal() => {}
            _ => return false,
        }
    }

    if let Some(bias) = &preference.location_bias {
        if !within_radius(
            bias.latitude,
            bias.longitude,
            facility.latitude,
            facility.longitude,
            bias.radius_km,
        ) {
            return false;
        }
    }

    true
}
