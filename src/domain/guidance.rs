//! Risk-level guidance and the notification feed derived from it.

use serde::Serialize;

use super::assessment::RiskLevel;

/// Headline and action items for a risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskGuidance {
    pub title: &'static str,
    pub recommendations: &'static [&'static str],
}

impl RiskLevel {
    #[must_use]
    pub fn guidance(&self) -> RiskGuidance {
        match self {
            Self::Low => RiskGuidance {
                title: "Low Risk - Keep it up!",
                recommendations: &[
                    "Continue regular exercise",
                    "Maintain healthy diet",
                    "Monthly check-ups recommended",
                ],
            },
            Self::Moderate => RiskGuidance {
                title: "Moderate Risk - Stay Alert",
                recommendations: &[
                    "Increase physical activity",
                    "Monitor diet closely",
                    "Weekly progress tracking",
                    "Consider lifestyle changes",
                ],
            },
            Self::High => RiskGuidance {
                title: "High Risk - Take Action",
                recommendations: &[
                    "Daily monitoring required",
                    "Consult healthcare provider",
                    "Immediate lifestyle changes",
                    "Emergency contact ready",
                ],
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u32,
    pub title: &'static str,
    pub message: &'static str,
    pub priority: NotificationPriority,
}

const DAILY_CHECK_IN: Notification = Notification {
    id: 1,
    title: "Daily Check-in Required",
    message: "Please log your health metrics for today.",
    priority: NotificationPriority::High,
};

const MEDICATION_REMINDER: Notification = Notification {
    id: 2,
    title: "Medication Reminder",
    message: "Time to take your prescribed medication.",
    priority: NotificationPriority::High,
};

const WEEKLY_PROGRESS: Notification = Notification {
    id: 3,
    title: "Weekly Progress Update",
    message: "Review how your health score changed this week.",
    priority: NotificationPriority::Medium,
};

const NEW_ARTICLE: Notification = Notification {
    id: 4,
    title: "New Article Available",
    message: "Learn about the latest in vascular health research.",
    priority: NotificationPriority::Low,
};

const EXERCISE_REMINDER: Notification = Notification {
    id: 5,
    title: "Exercise Reminder",
    message: "Remember to log your exercise.",
    priority: NotificationPriority::Medium,
};

/// Notification feed for a user, risk-specific items first.
#[must_use]
pub fn notifications_for(risk_level: Option<RiskLevel>) -> Vec<Notification> {
    let mut feed = match risk_level {
        Some(RiskLevel::High) => vec![DAILY_CHECK_IN, MEDICATION_REMINDER],
        Some(RiskLevel::Moderate) => vec![WEEKLY_PROGRESS],
        Some(RiskLevel::Low) | None => Vec::new(),
    };
    feed.extend([NEW_ARTICLE, EXERCISE_REMINDER]);
    feed
}
