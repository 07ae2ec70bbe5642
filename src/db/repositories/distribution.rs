use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, Statement, TransactionTrait, Value,
};

use crate::domain::{DistributionId, OrganizationId, UserId};
use crate::entities::{door_distributions, prelude::*, user_profiles};
use crate::models::distribution::{DoorDistribution, NewDistribution};

/// Outcome of a ledger write. The conditional debit either applied together
/// with the insert, or neither happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded(DoorDistribution),
    InsufficientDoors,
}

const DEBIT_SQL: &str = "UPDATE user_profiles \
     SET doors_available = doors_available - ?, \
         doors_distributed = doors_distributed + ?, \
         updated_at = ? \
     WHERE id = ? AND doors_available >= ?";

const INSERT_SQL: &str = "INSERT INTO door_distributions \
     (distributor_id, recipient_id, organization_id, doors_sent, reason, created_at) \
     VALUES (?, ?, ?, ?, ?, ?)";

pub struct DistributionRepository {
    conn: DatabaseConnection,
}

impl DistributionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Debits the distributor and appends the ledger row in one transaction.
    ///
    /// The debit only matches while `doors_available >= doors_sent`, so two
    /// concurrent sends can never overdraw the balance between them.
    pub async fn record(&self, new: &NewDistribution) -> Result<RecordOutcome> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;

        let debit = UserProfiles::update_many()
            .col_expr(
                user_profiles::Column::DoorsAvailable,
                Expr::col(user_profiles::Column::DoorsAvailable).sub(new.doors_sent),
            )
            .col_expr(
                user_profiles::Column::DoorsDistributed,
                Expr::col(user_profiles::Column::DoorsDistributed).add(new.doors_sent),
            )
            .col_expr(user_profiles::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(user_profiles::Column::Id.eq(new.distributor_id.value()))
            .filter(user_profiles::Column::DoorsAvailable.gte(new.doors_sent))
            .exec(&txn)
            .await
            .context("Failed to debit distributor balance")?;

        if debit.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(RecordOutcome::InsufficientDoors);
        }

        let inserted = DoorDistributions::insert(door_distributions::ActiveModel {
            distributor_id: Set(new.distributor_id.value()),
            recipient_id: Set(new.recipient_id.value()),
            organization_id: Set(new.organization_id.map(|o| o.value())),
            doors_sent: Set(new.doors_sent),
            reason: Set(new.reason.clone()),
            created_at: Set(now),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .context("Failed to insert door distribution")?;

        let distribution = Self::fetch_in(&txn, inserted.last_insert_id).await?;
        txn.commit().await?;

        Ok(RecordOutcome::Recorded(distribution))
    }

    /// Same contract as [`Self::record`], issued as plain SQL statements
    /// rather than through the entity layer. Used as the privileged path when
    /// the entity write is rejected.
    pub async fn record_via_procedure(&self, new: &NewDistribution) -> Result<RecordOutcome> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;
        let backend = txn.get_database_backend();

        let debit = txn
            .execute(Statement::from_sql_and_values(
                backend,
                DEBIT_SQL,
                [
                    Value::from(new.doors_sent),
                    Value::from(new.doors_sent),
                    Value::from(now.clone()),
                    Value::from(new.distributor_id.value()),
                    Value::from(new.doors_sent),
                ],
            ))
            .await
            .context("Procedure debit failed")?;

        if debit.rows_affected() == 0 {
            txn.rollback().await?;
            return Ok(RecordOutcome::InsufficientDoors);
        }

        let inserted = txn
            .execute(Statement::from_sql_and_values(
                backend,
                INSERT_SQL,
                [
                    Value::from(new.distributor_id.value()),
                    Value::from(new.recipient_id.value()),
                    Value::from(new.organization_id.map(|o| o.value())),
                    Value::from(new.doors_sent),
                    Value::from(new.reason.clone()),
                    Value::from(now),
                ],
            ))
            .await
            .context("Procedure insert failed")?;

        let id = i32::try_from(inserted.last_insert_id())
            .context("Distribution id out of range")?;
        let distribution = Self::fetch_in(&txn, id).await?;
        txn.commit().await?;

        Ok(RecordOutcome::Recorded(distribution))
    }

    async fn fetch_in(txn: &DatabaseTransaction, id: i32) -> Result<DoorDistribution> {
        DoorDistributions::find_by_id(id)
            .one(txn)
            .await?
            .map(DoorDistribution::from)
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve recorded distribution {id}"))
    }

    pub async fn get(&self, id: DistributionId) -> Result<Option<DoorDistribution>> {
        let row = DoorDistributions::find_by_id(id.value())
            .one(&self.conn)
            .await?;

        Ok(row.map(DoorDistribution::from))
    }

    /// Newest first.
    pub async fn sent_by(&self, distributor_id: UserId) -> Result<Vec<DoorDistribution>> {
        let rows = DoorDistributions::find()
            .filter(door_distributions::Column::DistributorId.eq(distributor_id.value()))
            .order_by_desc(door_distributions::Column::CreatedAt)
            .order_by_desc(door_distributions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query distributions by distributor")?;

        Ok(rows.into_iter().map(DoorDistribution::from).collect())
    }

    /// Newest first.
    pub async fn received_by(&self, recipient_id: UserId) -> Result<Vec<DoorDistribution>> {
        let rows = DoorDistributions::find()
            .filter(door_distributions::Column::RecipientId.eq(recipient_id.value()))
            .order_by_desc(door_distributions::Column::CreatedAt)
            .order_by_desc(door_distributions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query distributions by recipient")?;

        Ok(rows.into_iter().map(DoorDistribution::from).collect())
    }

    /// Newest first.
    pub async fn for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DoorDistribution>> {
        let rows = DoorDistributions::find()
            .filter(door_distributions::Column::OrganizationId.eq(organization_id.value()))
            .order_by_desc(door_distributions::Column::CreatedAt)
            .order_by_desc(door_distributions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query organization distributions")?;

        Ok(rows.into_iter().map(DoorDistribution::from).collect())
    }
}
