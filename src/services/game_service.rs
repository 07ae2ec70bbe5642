//! Domain service for game plays and per-user play statistics.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{PrizeId, UserId};
use crate::models::game::{GamePlay, Prize};
use crate::models::reward::UserReward;
use crate::services::validation::ValidationError;

/// A play with its prize attached when the prize still exists.
#[derive(Debug, Clone, Serialize)]
pub struct GamePlayView {
    #[serde(flatten)]
    pub play: GamePlay,
    pub prize: Option<Prize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub games_played: u64,
    pub rewards_earned: usize,
    pub rewards_claimed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayResult {
    pub play: GamePlay,
    pub reward: Option<UserReward>,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Prize not found: {0}")]
    PrizeNotFound(PrizeId),

    #[error("No doors available to play")]
    NoDoorsAvailable,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for GameError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

impl From<sea_orm::DbErr> for GameError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for GameError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    /// Most recent plays, newest first, up to the configured limit.
    async fn user_game_plays(&self, user_id: UserId) -> Result<Vec<GamePlayView>, GameError>;

    async fn user_stats(&self, user_id: UserId) -> Result<UserStats, GameError>;

    /// Spends one door on a play. A win must name the prize it won; the
    /// winner gets a redeemable reward code.
    async fn record_game_play(
        &self,
        user_id: UserId,
        prize_id: Option<PrizeId>,
        win: bool,
    ) -> Result<PlayResult, GameError>;

    async fn create_prize(
        &self,
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Prize, GameError>;
}
