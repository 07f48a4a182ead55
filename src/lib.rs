//! # Jendo
//!
//! Vascular health risk assessment.
//!
//! This crate provides:
//! - A deterministic risk calculator over survey inputs (age, BMI, blood
//!   pressure, heart rate, smoking, diabetes, family history)
//! - A per-day, append-only health score history
//! - Profile persistence behind an injected document-store port
//! - Dashboard guidance, notifications and an educational catalog
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types and the pure calculator
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (SQLite, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::{assess, DerivedAssessment, ProfileInput, ProfileRecord, RiskLevel};

/// Result type for Jendo operations
pub type Result<T> = std::result::Result<T, JendoError>;

/// Main error type for Jendo
#[derive(Debug, thiserror::Error)]
pub enum JendoError {
    #[error("Invalid profile data: {}", join_messages(.0))]
    Validation(Vec<domain::ValidationError>),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JendoError {
    /// Text suitable for showing to the person who submitted the form.
    ///
    /// Storage and internal failures collapse to a generic retry message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => join_messages(errors),
            Self::Storage(_) => "Failed to save profile. Please try again.".to_string(),
            Self::Config(_) | Self::Io(_) | Self::Serialization(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

fn join_messages(errors: &[domain::ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
