//! Domain layer: Core business types and logic.
//!
//! Pure Rust types and functions with no I/O. The assessment calculator
//! takes the current date as an argument so results are reproducible.

mod account;
pub mod assessment;
mod education;
mod guidance;
pub mod history;
mod profile;
mod record;

pub use account::{Registration, MIN_PASSWORD_LEN};
pub use assessment::{
    assess, assess_with_policy, BmiStatus, BpRisk, BpStatus, DerivedAssessment, RiskLevel,
    ScoringPolicy, PENDING_DESCRIPTION,
};
pub use education::{search_catalog, ContentCategory, ContentKind, EducationItem, CATALOG};
pub use guidance::{notifications_for, Notification, NotificationPriority, RiskGuidance};
pub use history::{append_health_score_entry, HealthScoreEntry};
pub use profile::{Gender, ProfileInput, SmokingStatus, ValidationError, YesNo};
pub use record::{ProfileRecord, UserDocument, UserIdentity};
