use serde::{Deserialize, Serialize};

/// Facility quality grade assigned by the external review body. `A` is best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityGrade {
    A,
    B,
    C,
    D,
    E,
}

impl FacilityGrade {
    /// Ordinal position, 1 (best) through 5.
    pub fn ordinal(self) -> u8 {
        match self {
            FacilityGrade::A => 1,
            FacilityGrade::B => 2,
            FacilityGrade::C => 3,
            FacilityGrade::D => 4,
            FacilityGrade::E => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FacilityGrade::A => "A",
            FacilityGrade::B => "B",
            FacilityGrade::C => "C",
            FacilityGrade::D => "D",
            FacilityGrade::E => "E",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "A" => Some(FacilityGrade::A),
            "B" => Some(FacilityGrade::B),
            "C" => Some(FacilityGrade::C),
            "D" => Some(FacilityGrade::D),
            "E" => Some(FacilityGrade::E),
            _ => None,
        }
    }
}

/// A facility's declared care focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialization {
    Dementia,
    Medical,
    Rehabilitation,
    Hospice,
}

/// Operating status reported by the facility directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingStatus {
    Operating,
    Suspended,
    Closed,
}

/// Facility candidate as served by the external directory.
///
/// The directory owns and mutates these; the matching core treats them
/// as read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    #[serde(rename = "facilityId")]
    pub facility_id: String,
    pub name: String,
    #[serde(default)]
    pub grade: Option<FacilityGrade>,
    #[serde(rename = "evaluationScore", default)]
    pub evaluation_score: f64,
    #[serde(rename = "facilityType")]
    pub facility_type: String,
    pub region: String,
    #[serde(rename = "acceptableCareGrades", default)]
    pub acceptable_care_grades: Vec<u8>,
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    #[serde(rename = "hasResidentDoctor", default)]
    pub has_resident_doctor: bool,
    #[serde(rename = "hasNursing24h", default)]
    pub has_nursing_24h: bool,
    #[serde(rename = "nurseCount", default)]
    pub nurse_count: u32,
    pub capacity: u32,
    #[serde(rename = "currentOccupancy", default)]
    pub current_occupancy: u32,
    #[serde(rename = "monthlyFee", default)]
    pub monthly_fee: Option<f64>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(rename = "nearSubway", default)]
    pub near_subway: bool,
    #[serde(rename = "nearHospital", default)]
    pub near_hospital: bool,
    #[serde(rename = "nearPharmacy", default)]
    pub near_pharmacy: bool,
    #[serde(rename = "acceptsLtci", default)]
    pub accepts_ltci: bool,
    #[serde(default = "default_status")]
    pub status: OperatingStatus,
}

fn default_status() -> OperatingStatus {
    OperatingStatus::Operating
}

impl Facility {
    /// Beds still open; occupancy above capacity clamps to zero.
    pub fn available_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.current_occupancy)
    }
}

/// Health assessment for an applicant, from the external assessment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// 1 (most severe) through 6 (cognitive support only).
    #[serde(rename = "careGradeLevel")]
    pub care_grade_level: u8,
    #[serde(rename = "ltciGrade")]
    pub ltci_grade: u8,
    #[serde(rename = "mobilityLevel")]
    pub mobility_level: u8,
    #[serde(rename = "needsHospiceCare", default)]
    pub needs_hospice_care: bool,
}

/// Optional geographic bias applied as a soft filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationBias {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
}

/// Caller-supplied preferences, immutable per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarePreference {
    #[serde(rename = "preferredRegions", default)]
    pub preferred_regions: Vec<String>,
    #[serde(rename = "preferredTypes", default)]
    pub preferred_types: Vec<String>,
    #[serde(rename = "maxMonthlyBudget", default)]
    pub max_monthly_budget: Option<f64>,
    #[serde(rename = "minFacilityGrade", default)]
    pub min_facility_grade: Option<FacilityGrade>,
    #[serde(rename = "maxResults", default = "default_max_results")]
    pub max_results: usize,
    #[serde(rename = "locationBias", default)]
    pub location_bias: Option<LocationBias>,
}

impl Default for CarePreference {
    fn default() -> Self {
        Self {
            preferred_regions: vec![],
            preferred_types: vec![],
            max_monthly_budget: None,
            min_facility_grade: None,
            max_results: default_max_results(),
            location_bias: None,
        }
    }
}

fn default_max_results() -> usize {
    10
}

/// Per-factor sub-scores, each on the 0-5 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub grade: f64,
    pub specialization: f64,
    pub staffing: f64,
    pub location: f64,
    pub cost: f64,
}

/// A ranked facility recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "facilityId")]
    pub facility_id: String,
    #[serde(rename = "facilityName")]
    pub facility_name: String,
    #[serde(rename = "facilityType")]
    pub facility_type: String,
    #[serde(rename = "facilityGrade")]
    pub facility_grade: Option<FacilityGrade>,
    pub rank: u32,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub breakdown: ScoreBreakdown,
    pub explanation: String,
    #[serde(rename = "estimatedMonthlyCost")]
    pub estimated_monthly_cost: Option<f64>,
    #[serde(rename = "availableBeds")]
    pub available_beds: u32,
    #[serde(rename = "evaluationScore")]
    pub evaluation_score: f64,
}

/// Fixed weight table for the five sub-scores.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub grade: f64,
    pub specialization: f64,
    pub staffing: f64,
    pub location: f64,
    pub cost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            grade: 0.30,
            specialization: 0.25,
            staffing: 0.20,
            location: 0.15,
            cost: 0.10,
        }
    }
}
