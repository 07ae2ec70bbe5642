use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;

use crate::domain::UserId;
use crate::domain::events::NotificationEvent;
use crate::entities::{notifications, prelude::*};

#[derive(Debug, Clone, Serialize)]
pub struct QueuedNotification {
    pub id: i32,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub payload: Option<String>,
    pub read: bool,
    pub created_at: String,
}

impl From<notifications::Model> for QueuedNotification {
    fn from(model: notifications::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            title: model.title,
            body: model.body,
            payload: model.payload,
            read: model.read,
            created_at: model.created_at,
        }
    }
}

pub struct NotificationRepository {
    conn: DatabaseConnection,
}

impl NotificationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn enqueue(&self, user_id: UserId, event: &NotificationEvent) -> Result<()> {
        let payload = serde_json::to_string(event).context("Failed to serialize notification")?;

        Notifications::insert(notifications::ActiveModel {
            user_id: Set(user_id.value()),
            title: Set(event.title()),
            body: Set(event.body()),
            payload: Set(Some(payload)),
            read: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        })
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to enqueue notification")?;

        Ok(())
    }

    pub async fn for_user(&self, user_id: UserId) -> Result<Vec<QueuedNotification>> {
        let rows = Notifications::find()
            .filter(notifications::Column::UserId.eq(user_id.value()))
            .order_by_desc(notifications::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query notifications")?;

        Ok(rows.into_iter().map(QueuedNotification::from).collect())
    }
}
