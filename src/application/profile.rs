//! Profile service: Orchestrates assessment submission.
//!
//! This service coordinates:
//! - Input validation
//! - Risk assessment
//! - Same-day history de-duplication
//! - Document persistence (subscribers are notified by the store)

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    append_health_score_entry, assess_with_policy, HealthScoreEntry, ProfileInput,
    ProfileRecord, ScoringPolicy, UserDocument, UserIdentity,
};
use crate::ports::{ProfileStore, ProfileUpdate};
use crate::JendoError;

use super::dashboard::DashboardSummary;

/// Service for submitting and reading vascular health profiles.
pub struct ProfileService<S>
where
    S: ProfileStore,
{
    store: Arc<S>,
    policy: ScoringPolicy,
}

impl<S> ProfileService<S>
where
    S: ProfileStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new profile service.
    pub fn new(store: Arc<S>, policy: ScoringPolicy) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Validate, assess and persist a submitted profile.
    ///
    /// The history gains one entry for the UTC day of `now` unless that day
    /// already has one. A first submission creates the user document.
    ///
    /// # Errors
    /// Returns `JendoError::Validation` for rejected inputs and
    /// `JendoError::Storage` if the document cannot be read or written.
    pub fn submit(
        &self,
        user: &UserIdentity,
        input: &ProfileInput,
        now: DateTime<Utc>,
    ) -> Result<ProfileRecord, JendoError> {
        let today = now.date_naive();
        input.validate(today).map_err(|errors| {
            tracing::info!(rejected = errors.len(), "Profile submission failed validation");
            JendoError::Validation(errors)
        })?;

        let assessment = assess_with_policy(input, today, self.policy);
        let entry = HealthScoreEntry::new(assessment.health_score, now);

        let document = match self.load_document(&user.email)? {
            Some(mut existing) => {
                let history = std::mem::take(&mut existing.profile.health_score_history);
                let history = append_health_score_entry(history, entry, today);
                existing.profile = ProfileRecord::new(input, &assessment, history);
                if user.name.is_some() {
                    existing.name.clone_from(&user.name);
                }
                existing
            }
            None => {
                tracing::info!("Creating new user document");
                UserDocument::new(user, now, ProfileRecord::new(input, &assessment, vec![entry]))
            }
        };

        self.store.save(&document).map_err(|e| {
            let err: crate::adapters::StorageError = e.into();
            tracing::error!("Failed to save profile: {}", err);
            JendoError::Storage(err)
        })?;

        tracing::info!(
            risk_level = ?assessment.risk_level,
            health_score = ?assessment.health_score,
            history_len = document.profile.health_score_history.len(),
            "Profile assessment saved"
        );

        Ok(document.profile)
    }

    /// The stored profile for a user.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn load(&self, user_id: &str) -> Result<Option<ProfileRecord>, JendoError> {
        Ok(self.load_document(user_id)?.map(|doc| doc.profile))
    }

    /// Form input rebuilt from the stored profile, for re-editing.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn prefill(&self, user_id: &str) -> Result<Option<ProfileInput>, JendoError> {
        Ok(self.load(user_id)?.map(|record| record.to_input()))
    }

    /// Dashboard data for a user with a stored profile.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn dashboard(&self, user_id: &str) -> Result<Option<DashboardSummary>, JendoError> {
        Ok(self
            .load(user_id)?
            .map(|record| DashboardSummary::from_record(&record)))
    }

    /// Delete the stored profile (account reset).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn reset(&self, user_id: &str) -> Result<(), JendoError> {
        tracing::warn!("Resetting stored profile");
        self.store
            .remove(user_id)
            .map_err(|e| JendoError::Storage(e.into()))
    }

    /// Receive profile changes made through any service sharing this store.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<ProfileUpdate> {
        self.store.subscribe()
    }

    fn load_document(&self, user_id: &str) -> Result<Option<UserDocument>, JendoError> {
        self.store
            .load(user_id)
            .map_err(|e| JendoError::Storage(e.into()))
    }
}
