//! Domain service for sending doors from a distributor to a recipient.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::StoreError;
use crate::domain::{DistributionId, UserId};
use crate::models::distribution::DoorDistribution;
use crate::services::validation::ValidationError;

/// Errors specific to door distribution.
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Distributor not found")]
    DistributorNotFound,

    #[error("Not enough doors available")]
    InsufficientDoors,

    /// The ledger entry and the balance debit are committed; only the
    /// per-door reward rows are missing.
    #[error("Distribution {distribution_id} recorded but rewards were not granted: {message}")]
    RewardGrantFailed {
        distribution_id: DistributionId,
        message: String,
    },

    #[error("Invalid ledger configuration: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<ValidationError> for DistributionError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

impl From<StoreError> for DistributionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InsufficientDoors => Self::InsufficientDoors,
            StoreError::NotFound(_) => Self::DistributorNotFound,
            StoreError::PermissionDenied(msg) | StoreError::Database(msg) => Self::Database(msg),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendDoorsRequest {
    pub distributor_id: UserId,
    pub recipient_id: UserId,
    pub doors_to_send: i32,
    pub reason: String,
}

/// Domain service trait for the distribution ledger.
#[async_trait::async_trait]
pub trait DistributionService: Send + Sync {
    /// Moves `doors_to_send` doors from the distributor to the recipient,
    /// queues a notification and grants one reward per door.
    ///
    /// Not idempotent: repeating a request records a second distribution.
    ///
    /// # Errors
    ///
    /// - [`DistributionError::Validation`] before anything is read.
    /// - [`DistributionError::InsufficientDoors`] with nothing written.
    /// - [`DistributionError::RewardGrantFailed`] after the distribution and
    ///   debit were committed. These are not rolled back.
    async fn send_doors(
        &self,
        request: SendDoorsRequest,
    ) -> Result<DoorDistribution, DistributionError>;
}
