//! Write seam used by the distribution workflow.
//!
//! The issuer only needs a handful of store operations. Keeping them behind a
//! trait lets another backend stand in for SQL, and lets tests inject
//! failures at individual steps.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::UserId;
use crate::domain::events::NotificationEvent;
use crate::models::distribution::{DoorDistribution, NewDistribution};
use crate::models::profile::UserProfile;
use crate::models::reward::RewardGrant;

use super::Store;
use super::repositories::distribution::RecordOutcome;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not enough doors available")]
    InsufficientDoors,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Atomically debits the distributor and appends the ledger row.
    ///
    /// # Errors
    ///
    /// [`StoreError::InsufficientDoors`] when the conditional debit matched
    /// nothing; in that case nothing was written.
    async fn record_distribution(
        &self,
        new: &NewDistribution,
    ) -> Result<DoorDistribution, StoreError>;

    /// Privileged variant of [`Self::record_distribution`] with the same
    /// atomicity contract.
    async fn record_distribution_via_procedure(
        &self,
        new: &NewDistribution,
    ) -> Result<DoorDistribution, StoreError>;

    async fn enqueue_notification(
        &self,
        user_id: UserId,
        event: &NotificationEvent,
    ) -> Result<(), StoreError>;

    /// Writes one reward row per granted door. Returns the row count.
    async fn grant_rewards(&self, grant: &RewardGrant) -> Result<u64, StoreError>;
}

fn recorded(outcome: RecordOutcome) -> Result<DoorDistribution, StoreError> {
    match outcome {
        RecordOutcome::Recorded(distribution) => Ok(distribution),
        RecordOutcome::InsufficientDoors => Err(StoreError::InsufficientDoors),
    }
}

#[async_trait]
impl LedgerStore for Store {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.get_profile(id).await?)
    }

    async fn record_distribution(
        &self,
        new: &NewDistribution,
    ) -> Result<DoorDistribution, StoreError> {
        recorded(self.debit_and_record(new).await?)
    }

    async fn record_distribution_via_procedure(
        &self,
        new: &NewDistribution,
    ) -> Result<DoorDistribution, StoreError> {
        recorded(self.debit_and_record_via_procedure(new).await?)
    }

    async fn enqueue_notification(
        &self,
        user_id: UserId,
        event: &NotificationEvent,
    ) -> Result<(), StoreError> {
        Ok(self.queue_notification(user_id, event).await?)
    }

    async fn grant_rewards(&self, grant: &RewardGrant) -> Result<u64, StoreError> {
        Ok(self.insert_earned_rewards(grant).await?)
    }
}
