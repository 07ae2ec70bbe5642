//! Domain service for reading the distribution ledger.
//!
//! The store performs no joins; names are attached here from batched
//! profile reads.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{DisplayName, OrganizationId, UserId};
use crate::models::distribution::DoorDistribution;
use crate::models::profile::UserProfile;

/// A distribution as seen by the distributor who sent it.
#[derive(Debug, Clone, Serialize)]
pub struct SentDistribution {
    #[serde(flatten)]
    pub distribution: DoorDistribution,
    pub recipient_name: DisplayName,
}

/// A distribution as seen by the user who received it.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedDistribution {
    #[serde(flatten)]
    pub distribution: DoorDistribution,
    pub distributor_name: DisplayName,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationDistribution {
    #[serde(flatten)]
    pub distribution: DoorDistribution,
    pub distributor_name: DisplayName,
    pub recipient_name: DisplayName,
}

/// A distributor with totals computed from their organization's ledger.
#[derive(Debug, Clone, Serialize)]
pub struct DistributorSummary {
    pub profile: UserProfile,
    pub display_name: String,
    pub total_doors_sent: i64,
    pub unique_recipients: usize,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for HistoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for HistoryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// All lists are newest first. A row whose profile is missing is kept with
/// [`DisplayName::Unknown`].
#[async_trait::async_trait]
pub trait HistoryService: Send + Sync {
    async fn distributor_history(
        &self,
        distributor_id: UserId,
    ) -> Result<Vec<SentDistribution>, HistoryError>;

    async fn received_history(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ReceivedDistribution>, HistoryError>;

    async fn organization_distributions(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<OrganizationDistribution>, HistoryError>;

    /// Distributor profiles in the organization, each with total doors sent
    /// and distinct recipients.
    async fn organization_distributors(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DistributorSummary>, HistoryError>;
}
