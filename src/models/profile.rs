use serde::{Deserialize, Serialize};

use crate::domain::{OrganizationId, UserId, UserType, profile_display_name};
use crate::entities::user_profiles;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: UserType,
    pub organization_id: Option<OrganizationId>,
    pub doors_available: i32,
    pub doors_distributed: i32,
    pub created_at: String,
}

impl UserProfile {
    #[must_use]
    pub fn display_name(&self) -> String {
        profile_display_name(
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            &self.email,
        )
    }

    #[must_use]
    pub fn is_distributor(&self) -> bool {
        self.user_type == UserType::Distributor
    }
}

impl From<user_profiles::Model> for UserProfile {
    fn from(model: user_profiles::Model) -> Self {
        let user_type = model.user_type.parse().unwrap_or_else(|_| {
            tracing::warn!(
                user_id = model.id,
                user_type = %model.user_type,
                "Unrecognised user type, treating profile as a regular user"
            );
            UserType::User
        });

        Self {
            id: UserId::new(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            user_type,
            organization_id: model.organization_id.map(OrganizationId::new),
            doors_available: model.doors_available,
            doors_distributed: model.doors_distributed,
            created_at: model.created_at,
        }
    }
}

/// Signup payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUserProfile {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: UserType,
    pub organization_id: Option<OrganizationId>,
    /// Initial allowance; regular signups start at 0.
    pub doors_available: i32,
}
