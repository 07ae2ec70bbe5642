use serde::{Deserialize, Serialize};

use crate::domain::{PrizeId, UserId};
use crate::entities::{game_plays, prizes};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlay {
    pub id: i32,
    pub user_id: UserId,
    pub prize_id: Option<PrizeId>,
    pub win: bool,
    pub created_at: String,
}

impl From<game_plays::Model> for GamePlay {
    fn from(model: game_plays::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            prize_id: model.prize_id.map(PrizeId::new),
            win: model.win,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub id: PrizeId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl From<prizes::Model> for Prize {
    fn from(model: prizes::Model) -> Self {
        Self {
            id: PrizeId::new(model.id),
            name: model.name,
            description: model.description,
            image_url: model.image_url,
            created_at: model.created_at,
        }
    }
}
