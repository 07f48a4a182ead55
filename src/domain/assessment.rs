//! Vascular risk assessment calculator.
//!
//! Maps survey inputs to a BMI category, a blood-pressure category, an
//! additive risk-point total, a 0-100 health score and a risk label.
//! Everything here is pure: the current date is always passed in.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::profile::{ProfileInput, SmokingStatus};

/// Risk-point total that maps to a health score of zero.
pub const MAX_RISK_POINTS: u32 = 15;

/// Risk points at or above which the level is High.
pub const HIGH_RISK_THRESHOLD: u32 = 10;

/// Risk points at or above which the level is Moderate.
pub const MODERATE_RISK_THRESHOLD: u32 = 6;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body mass index category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Display color (hex).
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => "#4caf50",
            Self::Underweight | Self::Overweight => "#ff9800",
            Self::Obese => "#f44336",
        }
    }
}

impl std::fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk weight attached to a blood-pressure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpRisk {
    Low,
    Moderate,
    High,
    Unknown,
}

/// Blood-pressure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BpStatus {
    Normal,
    Elevated,
    #[serde(rename = "High (Stage 1)")]
    Stage1,
    #[serde(rename = "High (Stage 2)")]
    Stage2,
    #[serde(rename = "Hypertensive Crisis")]
    HypertensiveCrisis,
    Unknown,
}

impl BpStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::Stage1 => "High (Stage 1)",
            Self::Stage2 => "High (Stage 2)",
            Self::HypertensiveCrisis => "Hypertensive Crisis",
            Self::Unknown => "Unknown",
        }
    }

    #[must_use]
    pub fn risk(&self) -> BpRisk {
        match self {
            Self::Normal => BpRisk::Low,
            Self::Elevated | Self::Stage1 => BpRisk::Moderate,
            Self::Stage2 | Self::HypertensiveCrisis => BpRisk::High,
            Self::Unknown => BpRisk::Unknown,
        }
    }

    /// Display color (hex).
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => "#4caf50",
            Self::Elevated => "#ff9800",
            Self::Stage1 => "#ff5722",
            Self::Stage2 => "#f44336",
            Self::HypertensiveCrisis => "#d32f2f",
            Self::Unknown => "#9e9e9e",
        }
    }
}

impl std::fmt::Display for BpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall vascular risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "You're at high risk for vascular health issues. We recommend consulting with a healthcare provider and frequent monitoring.",
            Self::Moderate => "You have some risk factors for vascular health issues. Regular monitoring and lifestyle adjustments are recommended.",
            Self::Low => "You're at low risk for vascular health issues. Maintain your healthy habits with our preventive guidance.",
        }
    }

    /// Display color (hex).
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#4CAF50",
            Self::Moderate => "#FF9800",
            Self::High => "#F44336",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description shown while no risk level can be computed.
pub const PENDING_DESCRIPTION: &str = "Risk assessment pending. Please complete all fields.";

/// How missing vitals affect the final score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    /// No score or risk level unless BMI, both pressures and heart rate are present.
    #[default]
    RequireVitals,
    /// Always score; each missing factor contributes zero points.
    MissingAsZero,
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "require-vitals" => Ok(Self::RequireVitals),
            "missing-as-zero" => Ok(Self::MissingAsZero),
            other => Err(format!(
                "Unknown scoring policy {other:?} (expected require-vitals or missing-as-zero)"
            )),
        }
    }
}

/// Everything derived from a `ProfileInput`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedAssessment {
    pub age: i32,
    pub bmi: Option<f64>,
    pub bmi_status: Option<BmiStatus>,
    pub bp_status: BpStatus,
    pub risk_points: Option<u32>,
    pub health_score: Option<f64>,
    pub risk_level: Option<RiskLevel>,
}

/// Age in completed years on `today`.
///
/// A birth date after `today` gives a negative age; range checks belong to
/// `ProfileInput::validate`.
#[must_use]
pub fn compute_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// BMI from kilograms and centimeters, rounded to one decimal.
///
/// `None` when either input is missing or zero.
#[must_use]
pub fn compute_bmi(weight: Option<f64>, height: Option<f64>) -> Option<f64> {
    let weight = weight.filter(|w| *w != 0.0)?;
    let height = height.filter(|h| *h != 0.0)?;
    let meters = height / 100.0;
    Some(round_to_tenth(weight / (meters * meters)))
}

#[must_use]
pub fn classify_bmi(bmi: f64) -> BmiStatus {
    if bmi < 18.5 {
        BmiStatus::Underweight
    } else if bmi < 25.0 {
        BmiStatus::Normal
    } else if bmi < 30.0 {
        BmiStatus::Overweight
    } else {
        BmiStatus::Obese
    }
}

/// Classify a reading by the first matching rule.
///
/// Stage 2 (`>=140` or `>=90`) is tested before the crisis rule, so a
/// crisis-level reading is reported as `Stage2` and `HypertensiveCrisis`
/// is never returned. Stored histories depend on this ordering.
#[must_use]
pub fn classify_blood_pressure(systolic: u32, diastolic: u32) -> BpStatus {
    if systolic < 120 && diastolic < 80 {
        BpStatus::Normal
    } else if (120..130).contains(&systolic) && diastolic < 80 {
        BpStatus::Elevated
    } else if (130..140).contains(&systolic) || (80..90).contains(&diastolic) {
        BpStatus::Stage1
    } else if systolic >= 140 || diastolic >= 90 {
        BpStatus::Stage2
    } else if systolic > 180 || diastolic > 120 {
        BpStatus::HypertensiveCrisis
    } else {
        BpStatus::Unknown
    }
}

fn age_points(age: i32) -> u32 {
    match age {
        a if a >= 60 => 3,
        50..=59 => 2,
        40..=49 => 1,
        _ => 0,
    }
}

fn bmi_points(bmi: f64) -> u32 {
    match classify_bmi(bmi) {
        BmiStatus::Obese => 3,
        BmiStatus::Overweight => 2,
        BmiStatus::Underweight => 1,
        BmiStatus::Normal => 0,
    }
}

fn blood_pressure_points(status: BpStatus) -> u32 {
    match status.risk() {
        BpRisk::High => 3,
        BpRisk::Moderate => 2,
        BpRisk::Low | BpRisk::Unknown => 0,
    }
}

fn heart_rate_points(bpm: u32) -> u32 {
    match bpm {
        b if b > 120 => 2,
        101..=120 => 1,
        b if b < 60 => 1,
        _ => 0,
    }
}

fn smoking_points(status: SmokingStatus) -> u32 {
    match status {
        SmokingStatus::Current => 3,
        SmokingStatus::Former => 1,
        SmokingStatus::Never => 0,
    }
}

/// Sum the additive risk table.
///
/// A missing BMI or heart rate, an `Unknown` pressure category and unset
/// lifestyle answers each contribute zero.
#[must_use]
pub fn compute_risk_points(
    profile: &ProfileInput,
    age: i32,
    bmi: Option<f64>,
    bp_status: BpStatus,
    heart_rate: Option<u32>,
) -> u32 {
    let mut points = age_points(age);
    points += bmi.map_or(0, bmi_points);
    points += blood_pressure_points(bp_status);
    points += heart_rate.map_or(0, heart_rate_points);
    points += profile.smoking_status.map_or(0, smoking_points);
    if profile.diabetes_status.is_some_and(|d| d.is_yes()) {
        points += 3;
    }
    if profile.family_history.is_some_and(|f| f.is_yes()) {
        points += 2;
    }
    points
}

/// `max(0, 100 - points / 15 * 100)` rounded to one decimal.
#[must_use]
pub fn compute_health_score(risk_points: u32) -> f64 {
    let raw = 100.0 - (f64::from(risk_points) / f64::from(MAX_RISK_POINTS)) * 100.0;
    round_to_tenth(raw.max(0.0))
}

#[must_use]
pub fn classify_risk_level(risk_points: u32) -> RiskLevel {
    if risk_points >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if risk_points >= MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Assess a profile with the default `RequireVitals` policy.
#[must_use]
pub fn assess(profile: &ProfileInput, today: NaiveDate) -> DerivedAssessment {
    assess_with_policy(profile, today, ScoringPolicy::default())
}

/// Assess a profile. Never fails; missing inputs only narrow the output.
#[must_use]
pub fn assess_with_policy(
    profile: &ProfileInput,
    today: NaiveDate,
    policy: ScoringPolicy,
) -> DerivedAssessment {
    let age = compute_age(profile.date_of_birth, today);
    let bmi = compute_bmi(profile.weight, profile.height);
    let bmi_status = bmi.map(classify_bmi);
    let bp_status = match (profile.systolic, profile.diastolic) {
        (Some(sys), Some(dia)) => classify_blood_pressure(sys, dia),
        _ => BpStatus::Unknown,
    };

    let vitals_complete = bmi.is_some()
        && profile.systolic.is_some()
        && profile.diastolic.is_some()
        && profile.heart_rate.is_some();

    let risk_points = match policy {
        ScoringPolicy::RequireVitals if !vitals_complete => None,
        _ => Some(compute_risk_points(
            profile,
            age,
            bmi,
            bp_status,
            profile.heart_rate,
        )),
    };

    DerivedAssessment {
        age,
        bmi,
        bmi_status,
        bp_status,
        risk_points,
        health_score: risk_points.map(compute_health_score),
        risk_level: risk_points.map(classify_risk_level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::YesNo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2026, 6, 1)
    }

    /// 175 cm: 98 kg gives BMI 32.0, 67 kg gives 21.9.
    fn high_risk_profile() -> ProfileInput {
        ProfileInput {
            weight: Some(98.0),
            height: Some(175.0),
            heart_rate: Some(130),
            systolic: Some(145),
            diastolic: Some(95),
            smoking_status: Some(SmokingStatus::Current),
            diabetes_status: Some(YesNo::Yes),
            family_history: Some(YesNo::Yes),
            ..ProfileInput::new(date(1961, 1, 15))
        }
    }

    fn low_risk_profile() -> ProfileInput {
        ProfileInput {
            weight: Some(67.0),
            height: Some(175.0),
            heart_rate: Some(70),
            systolic: Some(115),
            diastolic: Some(75),
            smoking_status: Some(SmokingStatus::Never),
            diabetes_status: Some(YesNo::No),
            family_history: Some(YesNo::No),
            ..ProfileInput::new(date(1996, 1, 15))
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        assert_eq!(compute_age(date(1990, 6, 1), date(2026, 6, 1)), 36);
        assert_eq!(compute_age(date(1990, 6, 2), date(2026, 6, 1)), 35);
        assert_eq!(compute_age(date(1990, 7, 1), date(2026, 6, 30)), 35);
        assert_eq!(compute_age(date(1990, 5, 31), date(2026, 6, 1)), 36);
    }

    #[test]
    fn test_age_future_birth_date_is_negative() {
        assert_eq!(compute_age(date(2028, 6, 2), date(2026, 6, 1)), -3);
        assert_eq!(compute_age(date(2028, 5, 1), date(2026, 6, 1)), -2);
    }

    #[test]
    fn test_bmi_rounding_and_missing_inputs() {
        assert_eq!(compute_bmi(Some(98.0), Some(175.0)), Some(32.0));
        assert_eq!(compute_bmi(Some(70.0), Some(170.0)), Some(24.2));
        assert_eq!(compute_bmi(None, Some(170.0)), None);
        assert_eq!(compute_bmi(Some(70.0), None), None);
        assert_eq!(compute_bmi(Some(0.0), Some(170.0)), None);
        assert_eq!(compute_bmi(Some(70.0), Some(0.0)), None);
    }

    #[test]
    fn test_bmi_boundaries_belong_to_upper_category() {
        assert_eq!(classify_bmi(18.4), BmiStatus::Underweight);
        assert_eq!(classify_bmi(18.5), BmiStatus::Normal);
        assert_eq!(classify_bmi(24.9), BmiStatus::Normal);
        assert_eq!(classify_bmi(25.0), BmiStatus::Overweight);
        assert_eq!(classify_bmi(29.9), BmiStatus::Overweight);
        assert_eq!(classify_bmi(30.0), BmiStatus::Obese);
    }

    #[test]
    fn test_blood_pressure_categories() {
        assert_eq!(classify_blood_pressure(115, 75), BpStatus::Normal);
        assert_eq!(classify_blood_pressure(125, 70), BpStatus::Elevated);
        assert_eq!(classify_blood_pressure(135, 70), BpStatus::Stage1);
        assert_eq!(classify_blood_pressure(110, 85), BpStatus::Stage1);
        assert_eq!(classify_blood_pressure(145, 95), BpStatus::Stage2);
        assert_eq!(classify_blood_pressure(118, 92), BpStatus::Stage2);
    }

    #[test]
    fn test_blood_pressure_boundary_120_79_is_elevated() {
        assert_eq!(classify_blood_pressure(119, 79), BpStatus::Normal);
        assert_eq!(classify_blood_pressure(120, 79), BpStatus::Elevated);
        assert_eq!(classify_blood_pressure(130, 79), BpStatus::Stage1);
        assert_eq!(classify_blood_pressure(140, 79), BpStatus::Stage2);
    }

    #[test]
    fn test_crisis_readings_report_stage_two() {
        // Stage 2 is matched first, so the crisis category is unreachable.
        assert_eq!(classify_blood_pressure(200, 130), BpStatus::Stage2);
        assert_eq!(classify_blood_pressure(185, 100), BpStatus::Stage2);
        assert_eq!(classify_blood_pressure(150, 125), BpStatus::Stage2);
    }

    #[test]
    fn test_bp_risk_weights() {
        assert_eq!(BpStatus::Normal.risk(), BpRisk::Low);
        assert_eq!(BpStatus::Elevated.risk(), BpRisk::Moderate);
        assert_eq!(BpStatus::Stage1.risk(), BpRisk::Moderate);
        assert_eq!(BpStatus::Stage2.risk(), BpRisk::High);
        assert_eq!(BpStatus::HypertensiveCrisis.risk(), BpRisk::High);
        assert_eq!(BpStatus::Unknown.risk(), BpRisk::Unknown);
    }

    #[test]
    fn test_factor_points() {
        assert_eq!(age_points(65), 3);
        assert_eq!(age_points(60), 3);
        assert_eq!(age_points(59), 2);
        assert_eq!(age_points(50), 2);
        assert_eq!(age_points(40), 1);
        assert_eq!(age_points(39), 0);
        assert_eq!(age_points(-3), 0);

        assert_eq!(heart_rate_points(121), 2);
        assert_eq!(heart_rate_points(120), 1);
        assert_eq!(heart_rate_points(101), 1);
        assert_eq!(heart_rate_points(100), 0);
        assert_eq!(heart_rate_points(60), 0);
        assert_eq!(heart_rate_points(59), 1);

        assert_eq!(bmi_points(17.0), 1);
        assert_eq!(bmi_points(22.0), 0);
        assert_eq!(bmi_points(27.0), 2);
        assert_eq!(bmi_points(30.0), 3);
    }

    #[test]
    fn test_risk_points_high_risk_scenario() {
        let profile = high_risk_profile();
        let points = compute_risk_points(&profile, 65, Some(32.0), BpStatus::Stage2, Some(130));
        assert_eq!(points, 19);
        assert!((compute_health_score(points) - 0.0).abs() < f64::EPSILON);
        assert_eq!(classify_risk_level(points), RiskLevel::High);
    }

    #[test]
    fn test_risk_points_low_risk_scenario() {
        let profile = low_risk_profile();
        let points = compute_risk_points(&profile, 30, Some(22.0), BpStatus::Normal, Some(70));
        assert_eq!(points, 0);
        assert!((compute_health_score(points) - 100.0).abs() < f64::EPSILON);
        assert_eq!(classify_risk_level(points), RiskLevel::Low);
    }

    #[test]
    fn test_unset_lifestyle_answers_contribute_nothing() {
        let profile = ProfileInput::new(date(1996, 1, 15));
        assert_eq!(
            compute_risk_points(&profile, 30, None, BpStatus::Unknown, None),
            0
        );
    }

    #[test]
    fn test_health_score_clamps_at_zero() {
        assert!((compute_health_score(0) - 100.0).abs() < f64::EPSILON);
        assert!((compute_health_score(1) - 93.3).abs() < 1e-9);
        assert!((compute_health_score(6) - 60.0).abs() < 1e-9);
        assert!((compute_health_score(15) - 0.0).abs() < f64::EPSILON);
        for points in 16..40 {
            assert!(compute_health_score(points) >= 0.0);
            assert!(compute_health_score(points).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(classify_risk_level(0), RiskLevel::Low);
        assert_eq!(classify_risk_level(5), RiskLevel::Low);
        assert_eq!(classify_risk_level(6), RiskLevel::Moderate);
        assert_eq!(classify_risk_level(9), RiskLevel::Moderate);
        assert_eq!(classify_risk_level(10), RiskLevel::High);
        assert_eq!(classify_risk_level(25), RiskLevel::High);
    }

    #[test]
    fn test_assess_high_risk_profile() {
        let assessment = assess(&high_risk_profile(), today());
        assert_eq!(assessment.age, 65);
        assert_eq!(assessment.bmi, Some(32.0));
        assert_eq!(assessment.bmi_status, Some(BmiStatus::Obese));
        assert_eq!(assessment.bp_status, BpStatus::Stage2);
        assert_eq!(assessment.risk_points, Some(19));
        assert_eq!(assessment.health_score, Some(0.0));
        assert_eq!(assessment.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn test_assess_low_risk_profile() {
        let assessment = assess(&low_risk_profile(), today());
        assert_eq!(assessment.age, 30);
        assert_eq!(assessment.bmi, Some(21.9));
        assert_eq!(assessment.bmi_status, Some(BmiStatus::Normal));
        assert_eq!(assessment.bp_status, BpStatus::Normal);
        assert_eq!(assessment.risk_points, Some(0));
        assert_eq!(assessment.health_score, Some(100.0));
        assert_eq!(assessment.risk_level, Some(RiskLevel::Low));
    }

    #[test]
    fn test_assess_missing_weight_suppresses_score() {
        let profile = ProfileInput {
            weight: None,
            ..high_risk_profile()
        };
        let assessment = assess(&profile, today());
        assert_eq!(assessment.bmi, None);
        assert_eq!(assessment.bmi_status, None);
        assert_eq!(assessment.bp_status, BpStatus::Stage2);
        assert_eq!(assessment.risk_points, None);
        assert_eq!(assessment.health_score, None);
        assert_eq!(assessment.risk_level, None);
    }

    #[test]
    fn test_assess_missing_weight_scores_as_zero_under_lenient_policy() {
        let profile = ProfileInput {
            weight: None,
            ..high_risk_profile()
        };
        let assessment = assess_with_policy(&profile, today(), ScoringPolicy::MissingAsZero);
        // 19 minus the 3 BMI points
        assert_eq!(assessment.risk_points, Some(16));
        assert_eq!(assessment.health_score, Some(0.0));
        assert_eq!(assessment.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn test_assess_missing_pressure_is_unknown() {
        let profile = ProfileInput {
            diastolic: None,
            ..low_risk_profile()
        };
        let assessment = assess(&profile, today());
        assert_eq!(assessment.bp_status, BpStatus::Unknown);
        assert!(assessment.risk_level.is_none());
    }

    #[test]
    fn test_assess_is_deterministic() {
        let profile = high_risk_profile();
        assert_eq!(assess(&profile, today()), assess(&profile, today()));
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(
            serde_json::to_string(&BpStatus::Stage1).expect("serialize"),
            "\"High (Stage 1)\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLevel::Moderate).expect("serialize"),
            "\"Moderate Risk\""
        );
        assert_eq!(RiskLevel::High.to_string(), "High Risk");
        assert_eq!(BpStatus::HypertensiveCrisis.to_string(), "Hypertensive Crisis");
    }

    #[test]
    fn test_scoring_policy_parse() {
        assert_eq!("require-vitals".parse::<ScoringPolicy>(), Ok(ScoringPolicy::RequireVitals));
        assert_eq!(" Missing-As-Zero ".parse::<ScoringPolicy>(), Ok(ScoringPolicy::MissingAsZero));
        assert!("strict".parse::<ScoringPolicy>().is_err());
    }
}
