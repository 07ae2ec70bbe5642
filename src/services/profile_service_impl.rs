//! `SeaORM` implementation of the `ProfileService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::Store;
use crate::domain::events::NotificationEvent;
use crate::domain::{OrganizationId, UserId, UserType};
use crate::models::organization::Organization;
use crate::models::profile::{NewUserProfile, UserProfile};
use crate::retry::RetryPolicy;
use crate::services::profile_service::{CreateProfileRequest, ProfileError, ProfileService};
use crate::services::validation::{
    validate_door_count, validate_email, validate_optional_name, validate_organization_name,
};

pub struct SeaOrmProfileService {
    store: Store,
    retry: RetryPolicy,
}

impl SeaOrmProfileService {
    #[must_use]
    pub const fn new(store: Store, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    async fn require_profile(&self, user_id: UserId) -> Result<UserProfile, ProfileError> {
        self.store
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("User {user_id}")))
    }
}

#[async_trait]
impl ProfileService for SeaOrmProfileService {
    async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, ProfileError> {
        self.retry
            .run("get_profile", || self.store.get_profile(user_id))
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("User {user_id}")))
    }

    async fn create_profile(
        &self,
        request: CreateProfileRequest,
    ) -> Result<UserProfile, ProfileError> {
        let email = validate_email(&request.email)?.to_lowercase();
        let first_name = validate_optional_name("First name", request.first_name.as_deref())?;
        let last_name = validate_optional_name("Last name", request.last_name.as_deref())?;
        if request.initial_doors < 0 {
            return Err(ProfileError::Validation(
                "Initial doors cannot be negative".to_string(),
            ));
        }

        if self.store.get_profile_by_email(&email).await?.is_some() {
            return Err(ProfileError::Conflict(format!(
                "A profile with email {email} already exists"
            )));
        }

        let profile = self
            .store
            .create_profile(&NewUserProfile {
                email,
                first_name: first_name.map(str::to_string),
                last_name: last_name.map(str::to_string),
                user_type: request.user_type,
                organization_id: None,
                doors_available: request.initial_doors,
            })
            .await?;

        info!(
            user_id = %profile.id,
            user_type = %profile.user_type,
            "Profile created"
        );
        Ok(profile)
    }

    async fn grant_doors(
        &self,
        admin_id: UserId,
        user_id: UserId,
        doors: i32,
    ) -> Result<UserProfile, ProfileError> {
        let doors = validate_door_count(doors)?;

        let admin = self.require_profile(admin_id).await?;
        if admin.user_type != UserType::Admin {
            return Err(ProfileError::Forbidden(format!(
                "User {admin_id} is not an administrator"
            )));
        }

        if !self.store.add_doors(user_id, doors).await? {
            return Err(ProfileError::NotFound(format!("User {user_id}")));
        }

        info!(admin_id = %admin_id, user_id = %user_id, doors, "Doors granted");

        let event = NotificationEvent::DoorsGranted { admin_id, doors };
        if let Err(e) = self.store.queue_notification(user_id, &event).await {
            warn!(user_id = %user_id, error = %e, "Failed to queue grant notification");
            metrics::counter!("opendoors_best_effort_failures_total", "step" => "notification")
                .increment(1);
        }

        self.require_profile(user_id).await
    }

    async fn create_organization(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Organization, ProfileError> {
        let name = validate_organization_name(name)?;
        let description = description.map(str::trim).filter(|d| !d.is_empty());

        let organization = self.store.create_organization(name, description).await?;
        info!(organization_id = %organization.id, name = %organization.name, "Organization created");
        Ok(organization)
    }

    async fn get_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Organization, ProfileError> {
        self.store
            .get_organization(organization_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(format!("Organization {organization_id}")))
    }

    async fn add_distributor(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<UserProfile, ProfileError> {
        self.get_organization(organization_id).await?;
        let profile = self.require_profile(user_id).await?;

        if profile.user_type == UserType::Admin {
            return Err(ProfileError::Validation(
                "Administrators cannot be made distributors".to_string(),
            ));
        }
        if let Some(current) = profile.organization_id.filter(|o| *o != organization_id) {
            return Err(ProfileError::Conflict(format!(
                "User {user_id} already distributes for organization {current}"
            )));
        }

        self.store.assign_distributor(user_id, organization_id).await?;
        self.store
            .add_distributor_member(organization_id, user_id)
            .await?;

        info!(
            organization_id = %organization_id,
            user_id = %user_id,
            "Distributor added to organization"
        );
        self.require_profile(user_id).await
    }
}
