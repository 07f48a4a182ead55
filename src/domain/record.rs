//! Persisted profile document shapes.
//!
//! Field names follow the camelCase layout of the stored user documents.
//! Unset categorical answers are stored as empty strings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::assessment::{BpStatus, DerivedAssessment, RiskLevel};
use super::history::HealthScoreEntry;
use super::profile::{Gender, ProfileInput, SmokingStatus, YesNo};

/// Serialize `None` as `""` and read `""` back as `None`.
mod blank_as_none {
    use serde::de::value::StrDeserializer;
    use serde::de::IntoDeserializer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.is_empty() {
            return Ok(None);
        }
        let de: StrDeserializer<'_, D::Error> = raw.as_str().into_deserializer();
        T::deserialize(de).map(Some)
    }
}

/// The profile section of a user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub age: i32,
    pub date_of_birth: NaiveDate,

    #[serde(default, with = "blank_as_none")]
    pub gender: Option<Gender>,

    pub weight: Option<f64>,
    pub height: Option<f64>,

    // Older documents may hold fractional readings.
    pub heart_rate: Option<f64>,
    pub systolic: Option<f64>,
    pub diastolic: Option<f64>,

    #[serde(default, with = "blank_as_none")]
    pub smoking_status: Option<SmokingStatus>,

    #[serde(default, with = "blank_as_none")]
    pub diabetes_status: Option<YesNo>,

    #[serde(default, with = "blank_as_none")]
    pub family_history: Option<YesNo>,

    pub bmi: Option<f64>,
    pub bp_status: BpStatus,
    pub risk_level: Option<RiskLevel>,
    pub health_score: Option<f64>,

    #[serde(default, alias = "HealthScoreHistory")]
    pub health_score_history: Vec<HealthScoreEntry>,
}

impl ProfileRecord {
    /// Combine the submitted input, its assessment and the resulting history.
    #[must_use]
    pub fn new(
        input: &ProfileInput,
        assessment: &DerivedAssessment,
        health_score_history: Vec<HealthScoreEntry>,
    ) -> Self {
        Self {
            age: assessment.age,
            date_of_birth: input.date_of_birth,
            gender: input.gender,
            weight: input.weight,
            height: input.height,
            heart_rate: input.heart_rate.map(f64::from),
            systolic: input.systolic.map(f64::from),
            diastolic: input.diastolic.map(f64::from),
            smoking_status: input.smoking_status,
            diabetes_status: input.diabetes_status,
            family_history: input.family_history,
            bmi: assessment.bmi,
            bp_status: assessment.bp_status,
            risk_level: assessment.risk_level,
            health_score: assessment.health_score,
            health_score_history,
        }
    }

    /// Rebuild the form input for re-editing a stored profile.
    ///
    /// Fractional readings are truncated to whole numbers.
    #[must_use]
    pub fn to_input(&self) -> ProfileInput {
        ProfileInput {
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            weight: self.weight,
            height: self.height,
            heart_rate: self.heart_rate.map(whole_reading),
            systolic: self.systolic.map(whole_reading),
            diastolic: self.diastolic.map(whole_reading),
            smoking_status: self.smoking_status,
            diabetes_status: self.diabetes_status,
            family_history: self.family_history,
        }
    }
}

// Saturating cast: negatives and NaN become 0 and fail validation later.
fn whole_reading(value: f64) -> u32 {
    value.trunc() as u32
}

/// Who is submitting. The email doubles as the document key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A stored user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(alias = "createAt")]
    pub created_at: DateTime<Utc>,

    pub profile: ProfileRecord,
}

impl UserDocument {
    #[must_use]
    pub fn new(user: &UserIdentity, created_at: DateTime<Utc>, profile: ProfileRecord) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            created_at,
            profile,
        }
    }
}
