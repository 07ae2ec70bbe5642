use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::domain::{PrizeId, UserId};
use crate::entities::{game_plays, prelude::*, prizes, user_profiles, user_rewards};
use crate::models::game::{GamePlay, Prize};
use crate::models::reward::UserReward;

#[derive(Debug, Clone)]
pub enum PlayOutcome {
    Played {
        play: GamePlay,
        reward: Option<UserReward>,
    },
    NoDoorsAvailable,
}

pub struct GameRepository {
    conn: DatabaseConnection,
}

impl GameRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Spends one door and appends the play. A winning play with a prize also
    /// issues a redeemable reward under `reward_code`.
    pub async fn record_play(
        &self,
        user_id: UserId,
        prize_id: Option<PrizeId>,
        win: bool,
        reward_code: &str,
    ) -> Result<PlayOutcome> {
        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.conn.begin().await?;

        let spent = UserProfiles::update_many()
            .col_expr(
                user_profiles::Column::DoorsAvailable,
                Expr::col(user_profiles::Column::DoorsAvailable).sub(1),
            )
            .col_expr(user_profiles::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(user_profiles::Column::Id.eq(user_id.value()))
            .filter(user_profiles::Column::DoorsAvailable.gte(1))
            .exec(&txn)
            .await
            .context("Failed to spend door")?;

        if spent.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(PlayOutcome::NoDoorsAvailable);
        }

        let inserted = GamePlays::insert(game_plays::ActiveModel {
            user_id: Set(user_id.value()),
            prize_id: Set(prize_id.map(|p| p.value())),
            win: Set(win),
            created_at: Set(now.clone()),
            ..Default::default()
        })
        .exec(&txn)
        .await
        .context("Failed to insert game play")?;

        let play = GamePlays::find_by_id(inserted.last_insert_id)
            .one(&txn)
            .await?
            .map(GamePlay::from)
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve recorded game play"))?;

        let reward = match prize_id {
            Some(prize_id) if win => {
                let inserted = UserRewards::insert(user_rewards::ActiveModel {
                    user_id: Set(user_id.value()),
                    prize_id: Set(prize_id.value()),
                    reward_code: Set(reward_code.to_string()),
                    qr_code: Set(None),
                    created_at: Set(now),
                    ..Default::default()
                })
                .exec(&txn)
                .await
                .context("Failed to insert user reward")?;

                UserRewards::find_by_id(inserted.last_insert_id)
                    .one(&txn)
                    .await?
                    .map(UserReward::from)
            }
            _ => None,
        };

        txn.commit().await?;

        Ok(PlayOutcome::Played { play, reward })
    }

    /// Newest first, capped at `limit`.
    pub async fn recent_plays(&self, user_id: UserId, limit: u64) -> Result<Vec<GamePlay>> {
        let rows = GamePlays::find()
            .filter(game_plays::Column::UserId.eq(user_id.value()))
            .order_by_desc(game_plays::Column::CreatedAt)
            .order_by_desc(game_plays::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query game plays")?;

        Ok(rows.into_iter().map(GamePlay::from).collect())
    }

    pub async fn play_count(&self, user_id: UserId) -> Result<u64> {
        let count = GamePlays::find()
            .filter(game_plays::Column::UserId.eq(user_id.value()))
            .count(&self.conn)
            .await
            .context("Failed to count game plays")?;

        Ok(count)
    }

    pub async fn prizes_by_ids(&self, ids: &[PrizeId]) -> Result<Vec<Prize>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i32> = ids.iter().map(PrizeId::value).collect();
        let rows = Prizes::find()
            .filter(prizes::Column::Id.is_in(raw))
            .all(&self.conn)
            .await
            .context("Failed to batch query prizes")?;

        Ok(rows.into_iter().map(Prize::from).collect())
    }

    pub async fn get_prize(&self, id: PrizeId) -> Result<Option<Prize>> {
        let row = Prizes::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query prize")?;

        Ok(row.map(Prize::from))
    }

    pub async fn create_prize(
        &self,
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Prize> {
        let result = Prizes::insert(prizes::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
            image_url: Set(image_url.map(str::to_string)),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert prize")?;

        self.get_prize(PrizeId::new(result.last_insert_id))
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve created prize"))
    }
}
