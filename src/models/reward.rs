use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DistributionId, PrizeId, UserId};
use crate::entities::{earned_rewards, user_rewards};

pub const DISTRIBUTOR_SOURCE: &str = "distributor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedReward {
    pub id: i32,
    pub user_id: UserId,
    pub doors_earned: i32,
    pub source_type: String,
    pub source_name: String,
    pub description: String,
    pub claimed: bool,
    pub created_at: String,
    pub expires_at: String,
    pub distribution_id: Option<DistributionId>,
}

impl From<earned_rewards::Model> for EarnedReward {
    fn from(model: earned_rewards::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            doors_earned: model.doors_earned,
            source_type: model.source_type,
            source_name: model.source_name,
            description: model.description,
            claimed: model.claimed,
            created_at: model.created_at,
            expires_at: model.expires_at,
            distribution_id: model.distribution_id.map(DistributionId::new),
        }
    }
}

/// A batch of per-door rewards. Expands into `doors` rows of one door each.
#[derive(Debug, Clone)]
pub struct RewardGrant {
    pub user_id: UserId,
    pub doors: i32,
    pub source_name: String,
    pub description: String,
    pub distribution_id: Option<DistributionId>,
    pub granted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A prize won in the game, redeemable by its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReward {
    pub id: i32,
    pub user_id: UserId,
    pub prize_id: PrizeId,
    pub reward_code: String,
    pub qr_code: Option<String>,
    pub created_at: String,
}

impl From<user_rewards::Model> for UserReward {
    fn from(model: user_rewards::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            prize_id: PrizeId::new(model.prize_id),
            reward_code: model.reward_code,
            qr_code: model.qr_code,
            created_at: model.created_at,
        }
    }
}
