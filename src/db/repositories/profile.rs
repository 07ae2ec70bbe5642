use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{OrganizationId, UserId, UserType};
use crate::entities::{prelude::*, user_profiles};
use crate::models::profile::{NewUserProfile, UserProfile};

pub struct ProfileRepository {
    conn: DatabaseConnection,
}

impl ProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: UserId) -> Result<Option<UserProfile>> {
        let profile = UserProfiles::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user profile by ID")?;

        Ok(profile.map(UserProfile::from))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        let profile = UserProfiles::find()
            .filter(user_profiles::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user profile by email")?;

        Ok(profile.map(UserProfile::from))
    }

    /// Batch lookup used by the client-side joins. Unknown ids are simply
    /// absent from the result.
    pub async fn get_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i32> = ids.iter().map(UserId::value).collect();
        let rows = UserProfiles::find()
            .filter(user_profiles::Column::Id.is_in(raw))
            .all(&self.conn)
            .await
            .context("Failed to batch query user profiles")?;

        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    pub async fn create(&self, profile: &NewUserProfile) -> Result<UserProfile> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = UserProfiles::insert(user_profiles::ActiveModel {
            email: Set(profile.email.clone()),
            first_name: Set(profile.first_name.clone()),
            last_name: Set(profile.last_name.clone()),
            user_type: Set(profile.user_type.as_str().to_string()),
            organization_id: Set(profile.organization_id.map(|o| o.value())),
            doors_available: Set(profile.doors_available),
            doors_distributed: Set(0),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert user profile")?;

        self.get(UserId::new(result.last_insert_id))
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created profile"))
    }

    pub async fn list_distributors(&self, organization_id: OrganizationId) -> Result<Vec<UserProfile>> {
        let rows = UserProfiles::find()
            .filter(user_profiles::Column::OrganizationId.eq(organization_id.value()))
            .filter(user_profiles::Column::UserType.eq(UserType::Distributor.as_str()))
            .order_by_asc(user_profiles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query organization distributors")?;

        Ok(rows.into_iter().map(UserProfile::from).collect())
    }

    /// Adds `doors` to a profile's balance. Returns `false` when no profile
    /// matched.
    pub async fn add_doors(&self, id: UserId, doors: i32) -> Result<bool> {
        let result = UserProfiles::update_many()
            .col_expr(
                user_profiles::Column::DoorsAvailable,
                Expr::col(user_profiles::Column::DoorsAvailable).add(doors),
            )
            .col_expr(
                user_profiles::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(user_profiles::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to add doors to profile")?;

        Ok(result.rows_affected > 0)
    }

    /// Moves a profile into an organization as a distributor.
    pub async fn assign_distributor(
        &self,
        id: UserId,
        organization_id: OrganizationId,
    ) -> Result<bool> {
        let result = UserProfiles::update_many()
            .col_expr(
                user_profiles::Column::OrganizationId,
                Expr::value(organization_id.value()),
            )
            .col_expr(
                user_profiles::Column::UserType,
                Expr::value(UserType::Distributor.as_str()),
            )
            .col_expr(
                user_profiles::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(user_profiles::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to assign distributor to organization")?;

        Ok(result.rows_affected > 0)
    }
}
