//! Survey input types for the vascular health assessment.
//!
//! `ProfileInput` is what the user enters on the assessment form. Every
//! measurement is optional: the calculator degrades gracefully when fields
//! are missing, and submission-time validation only checks the fields that
//! are present.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Oldest age accepted on submission.
pub const MAX_AGE_YEARS: i32 = 130;

/// Accepted weight range in kilograms.
pub const WEIGHT_RANGE_KG: (f64, f64) = (1.0, 500.0);

/// Accepted height range in centimeters.
pub const HEIGHT_RANGE_CM: (f64, f64) = (30.0, 300.0);

/// Accepted resting heart rate range in beats per minute.
pub const HEART_RATE_RANGE_BPM: (u32, u32) = (20, 300);

/// Accepted systolic pressure range in mmHg.
pub const SYSTOLIC_RANGE_MMHG: (u32, u32) = (50, 300);

/// Accepted diastolic pressure range in mmHg.
pub const DIASTOLIC_RANGE_MMHG: (u32, u32) = (20, 200);

/// Self-reported gender. Informational only, never scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Smoking history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl SmokingStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Former => "former",
            Self::Current => "current",
        }
    }
}

/// Answer to a yes/no survey question (diabetes, family history).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    #[must_use]
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// A single rejected field from form or profile validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Date of birth {0} is in the future")]
    FutureBirthDate(NaiveDate),

    #[error("Age {0} exceeds the supported maximum of {MAX_AGE_YEARS}")]
    ImplausibleAge(i32),

    #[error("{field} {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Diastolic pressure {diastolic} exceeds systolic pressure {systolic}")]
    DiastolicAboveSystolic { systolic: u32, diastolic: u32 },

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

/// Survey data entered on the assessment form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub date_of_birth: NaiveDate,

    #[serde(default)]
    pub gender: Option<Gender>,

    /// Kilograms
    #[serde(default)]
    pub weight: Option<f64>,

    /// Centimeters
    #[serde(default)]
    pub height: Option<f64>,

    /// Beats per minute
    #[serde(default)]
    pub heart_rate: Option<u32>,

    /// mmHg
    #[serde(default)]
    pub systolic: Option<u32>,

    /// mmHg
    #[serde(default)]
    pub diastolic: Option<u32>,

    #[serde(default)]
    pub smoking_status: Option<SmokingStatus>,

    #[serde(default)]
    pub diabetes_status: Option<YesNo>,

    #[serde(default)]
    pub family_history: Option<YesNo>,
}

impl ProfileInput {
    /// Create an input with only the birth date filled in.
    #[must_use]
    pub fn new(date_of_birth: NaiveDate) -> Self {
        Self {
            date_of_birth,
            gender: None,
            weight: None,
            height: None,
            heart_rate: None,
            systolic: None,
            diastolic: None,
            smoking_status: None,
            diabetes_status: None,
            family_history: None,
        }
    }

    /// Validate the fields that are present against plausible ranges.
    ///
    /// Missing fields are not an error here; they only suppress the
    /// dependent parts of the assessment.
    ///
    /// # Errors
    /// Returns every rejected field.
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.date_of_birth > today {
            errors.push(ValidationError::FutureBirthDate(self.date_of_birth));
        } else if today.year() - self.date_of_birth.year() > MAX_AGE_YEARS {
            errors.push(ValidationError::ImplausibleAge(
                today.year() - self.date_of_birth.year(),
            ));
        }

        if let Some(weight) = self.weight {
            check_range(&mut errors, "Weight", weight, WEIGHT_RANGE_KG);
        }
        if let Some(height) = self.height {
            check_range(&mut errors, "Height", height, HEIGHT_RANGE_CM);
        }
        if let Some(rate) = self.heart_rate {
            check_range(
                &mut errors,
                "Heart rate",
                f64::from(rate),
                widen(HEART_RATE_RANGE_BPM),
            );
        }
        if let Some(sys) = self.systolic {
            check_range(
                &mut errors,
                "Systolic pressure",
                f64::from(sys),
                widen(SYSTOLIC_RANGE_MMHG),
            );
        }
        if let Some(dia) = self.diastolic {
            check_range(
                &mut errors,
                "Diastolic pressure",
                f64::from(dia),
                widen(DIASTOLIC_RANGE_MMHG),
            );
        }
        if let (Some(systolic), Some(diastolic)) = (self.systolic, self.diastolic) {
            if diastolic > systolic {
                errors.push(ValidationError::DiastolicAboveSystolic { systolic, diastolic });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn widen((min, max): (u32, u32)) -> (f64, f64) {
    (f64::from(min), f64::from(max))
}

fn check_range(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) {
    // NaN fails `contains` as well
    if !(min..=max).contains(&value) {
        errors.push(ValidationError::OutOfRange { field, value, min, max });
    }
}
