//! `SeaORM` implementation of the `GameService` trait.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

use crate::config::HistoryConfig;
use crate::db::{PlayOutcome, Store};
use crate::domain::events::NotificationEvent;
use crate::domain::{PrizeId, UserId};
use crate::models::game::{GamePlay, Prize};
use crate::models::reward::EarnedReward;
use crate::services::game_service::{
    GameError, GamePlayView, GameService, PlayResult, UserStats,
};
use crate::services::validation::validate_prize_name;

pub struct SeaOrmGameService {
    store: Store,
    config: HistoryConfig,
}

impl SeaOrmGameService {
    #[must_use]
    pub const fn new(store: Store, config: HistoryConfig) -> Self {
        Self { store, config }
    }
}

/// Fresh redeemable code, e.g. `3F2504E04F8941D39A0C0305E82C3301`.
fn new_reward_code() -> String {
    uuid::Uuid::new_v4().simple().to_string().to_uppercase()
}

fn attach_prizes(plays: Vec<GamePlay>, prizes: Vec<Prize>) -> Vec<GamePlayView> {
    let by_id: HashMap<PrizeId, Prize> = prizes.into_iter().map(|p| (p.id, p)).collect();
    plays
        .into_iter()
        .map(|play| GamePlayView {
            prize: play.prize_id.and_then(|id| by_id.get(&id).cloned()),
            play,
        })
        .collect()
}

fn stats_from(games_played: u64, rewards: &[EarnedReward]) -> UserStats {
    UserStats {
        games_played,
        rewards_earned: rewards.len(),
        rewards_claimed: rewards.iter().filter(|r| r.claimed).count(),
    }
}

#[async_trait]
impl GameService for SeaOrmGameService {
    async fn user_game_plays(&self, user_id: UserId) -> Result<Vec<GamePlayView>, GameError> {
        let plays = self
            .store
            .recent_game_plays(user_id, self.config.recent_game_plays)
            .await?;

        let prize_ids: Vec<PrizeId> = plays
            .iter()
            .filter_map(|p| p.prize_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let prizes = self.store.get_prizes_by_ids(&prize_ids).await?;

        Ok(attach_prizes(plays, prizes))
    }

    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, GameError> {
        let (played, rewards) = tokio::join!(
            self.store.game_play_count(user_id),
            self.store.earned_rewards_for_user(user_id)
        );

        Ok(stats_from(played?, &rewards?))
    }

    async fn record_game_play(
        &self,
        user_id: UserId,
        prize_id: Option<PrizeId>,
        win: bool,
    ) -> Result<PlayResult, GameError> {
        if win && prize_id.is_none() {
            return Err(GameError::Validation(
                "A winning play must name its prize".to_string(),
            ));
        }

        if self.store.get_profile(user_id).await?.is_none() {
            return Err(GameError::UserNotFound(user_id));
        }

        let prize = match prize_id {
            Some(id) => Some(
                self.store
                    .get_prize(id)
                    .await?
                    .ok_or(GameError::PrizeNotFound(id))?,
            ),
            None => None,
        };

        let reward_code = new_reward_code();
        let outcome = self
            .store
            .record_game_play(user_id, prize_id, win, &reward_code)
            .await?;

        let (play, reward) = match outcome {
            PlayOutcome::Played { play, reward } => (play, reward),
            PlayOutcome::NoDoorsAvailable => return Err(GameError::NoDoorsAvailable),
        };

        info!(user_id = %user_id, play_id = play.id, win, "Game play recorded");
        metrics::counter!("opendoors_game_plays_total", "win" => win.to_string()).increment(1);

        if let (Some(prize), Some(reward)) = (&prize, &reward) {
            let event = NotificationEvent::PrizeWon {
                prize_name: prize.name.clone(),
                reward_code: reward.reward_code.clone(),
            };
            if let Err(e) = self.store.queue_notification(user_id, &event).await {
                warn!(user_id = %user_id, error = %e, "Failed to queue prize notification");
                metrics::counter!("opendoors_best_effort_failures_total", "step" => "notification")
                    .increment(1);
            }
        }

        Ok(PlayResult { play, reward })
    }

    async fn create_prize(
        &self,
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Prize, GameError> {
        let name = validate_prize_name(name)?;
        let description = description.map(str::trim).filter(|d| !d.is_empty());
        let image_url = image_url.map(str::trim).filter(|u| !u.is_empty());

        let prize = self.store.create_prize(name, description, image_url).await?;
        info!(prize_id = %prize.id, name = %prize.name, "Prize created");
        Ok(prize)
    }
}
