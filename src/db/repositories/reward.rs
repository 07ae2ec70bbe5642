use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::UserId;
use crate::entities::{earned_rewards, prelude::*};
use crate::models::reward::{DISTRIBUTOR_SOURCE, EarnedReward, RewardGrant};

pub struct RewardRepository {
    conn: DatabaseConnection,
}

impl RewardRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts one `earned_rewards` row per door in the grant, as a single
    /// batch. Returns the number of rows written.
    pub async fn grant(&self, grant: &RewardGrant) -> Result<u64> {
        let doors = u64::try_from(grant.doors).unwrap_or(0);
        if doors == 0 {
            return Ok(0);
        }

        let created_at = grant.granted_at.to_rfc3339();
        let expires_at = grant.expires_at.to_rfc3339();

        let rows: Vec<earned_rewards::ActiveModel> = (0..doors)
            .map(|_| earned_rewards::ActiveModel {
                user_id: Set(grant.user_id.value()),
                doors_earned: Set(1),
                source_type: Set(DISTRIBUTOR_SOURCE.to_string()),
                source_name: Set(grant.source_name.clone()),
                description: Set(grant.description.clone()),
                claimed: Set(false),
                created_at: Set(created_at.clone()),
                expires_at: Set(expires_at.clone()),
                distribution_id: Set(grant.distribution_id.map(|d| d.value())),
                ..Default::default()
            })
            .collect();

        EarnedRewards::insert_many(rows)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert earned rewards")?;

        Ok(doors)
    }

    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<EarnedReward>> {
        let rows = EarnedRewards::find()
            .filter(earned_rewards::Column::UserId.eq(user_id.value()))
            .order_by_desc(earned_rewards::Column::CreatedAt)
            .order_by_desc(earned_rewards::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query earned rewards")?;

        Ok(rows.into_iter().map(EarnedReward::from).collect())
    }
}
