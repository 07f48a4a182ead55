//! Dashboard view model built from a stored profile.

use serde::Serialize;

use crate::domain::history::score_trend;
use crate::domain::{
    notifications_for, BpStatus, Notification, ProfileRecord, RiskGuidance, RiskLevel,
    PENDING_DESCRIPTION,
};

/// Number of history points shown in the score trend.
pub const TREND_WINDOW: usize = 7;

/// Everything the dashboard needs in one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub risk_level: Option<RiskLevel>,
    pub description: &'static str,
    pub health_score: Option<f64>,
    pub bmi: Option<f64>,
    pub bp_status: BpStatus,
    pub guidance: Option<RiskGuidance>,
    /// Most recent scores, oldest first
    pub trend: Vec<f64>,
    pub notifications: Vec<Notification>,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_record(record: &ProfileRecord) -> Self {
        let risk_level = record.risk_level;
        Self {
            risk_level,
            description: risk_level.map_or(PENDING_DESCRIPTION, |r| r.description()),
            health_score: record.health_score,
            bmi: record.bmi,
            bp_status: record.bp_status,
            guidance: risk_level.map(|r| r.guidance()),
            trend: score_trend(&record.health_score_history, TREND_WINDOW),
            notifications: notifications_for(risk_level),
        }
    }
}
