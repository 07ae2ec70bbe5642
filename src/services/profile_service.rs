//! Domain service for user profiles, organizations and distributor
//! membership.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{OrganizationId, UserId, UserType};
use crate::models::organization::Organization;
use crate::models::profile::UserProfile;
use crate::services::validation::ValidationError;

/// Signup request as it arrives from a caller, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: UserType,
    pub initial_doors: i32,
}

/// Errors specific to profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ProfileError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for profiles and organizations.
#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    // Profiles

    /// Reads a profile, retrying transient store failures.
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, ProfileError>;

    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<UserProfile, ProfileError>;

    /// Adds doors to a user's balance. Only admins may grant.
    async fn grant_doors(
        &self,
        admin_id: UserId,
        user_id: UserId,
        doors: i32,
    ) -> Result<UserProfile, ProfileError>;

    // Organizations

    async fn create_organization(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Organization, ProfileError>;

    async fn get_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Organization, ProfileError>;

    /// Makes the user a distributor of the organization. Repeating the call
    /// for the same pair is a no-op.
    async fn add_distributor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<UserProfile, ProfileError>;
}
