use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{OrganizationId, UserId};
use crate::entities::{distributor_members, organizations, prelude::*};
use crate::models::organization::Organization;

pub struct OrganizationRepository {
    conn: DatabaseConnection,
}

impl OrganizationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Organization> {
        let result = Organizations::insert(organizations::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert organization")?;

        self.get(OrganizationId::new(result.last_insert_id))
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created organization"))
    }

    pub async fn get(&self, id: OrganizationId) -> Result<Option<Organization>> {
        let row = Organizations::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query organization")?;

        Ok(row.map(Organization::from))
    }

    /// Records membership; an existing (organization, user) pair is left as is.
    pub async fn add_member(&self, organization_id: OrganizationId, user_id: UserId) -> Result<()> {
        DistributorMembers::insert(distributor_members::ActiveModel {
            organization_id: Set(organization_id.value()),
            user_id: Set(user_id.value()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                distributor_members::Column::OrganizationId,
                distributor_members::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to insert distributor membership")?;

        Ok(())
    }

    pub async fn member_ids(&self, organization_id: OrganizationId) -> Result<Vec<UserId>> {
        let rows = DistributorMembers::find()
            .filter(distributor_members::Column::OrganizationId.eq(organization_id.value()))
            .all(&self.conn)
            .await
            .context("Failed to query distributor memberships")?;

        Ok(rows.into_iter().map(|m| UserId::new(m.user_id)).collect())
    }
}
