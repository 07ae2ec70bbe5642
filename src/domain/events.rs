//! Notification payloads queued for users.
//!
//! These are written to the `notifications` table; displaying them is the
//! client's job.

use serde::Serialize;

use super::{DistributionId, UserId};

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum NotificationEvent {
    DoorsReceived {
        distribution_id: DistributionId,
        distributor_id: UserId,
        distributor_name: String,
        doors: i32,
        reason: String,
    },
    DoorsGranted {
        admin_id: UserId,
        doors: i32,
    },
    PrizeWon {
        prize_name: String,
        reward_code: String,
    },
}

impl NotificationEvent {
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::DoorsReceived { doors, .. } | Self::DoorsGranted { doors, .. } => {
                if *doors == 1 {
                    "You received a door!".to_string()
                } else {
                    format!("You received {doors} doors!")
                }
            }
            Self::PrizeWon { .. } => "You won a prize!".to_string(),
        }
    }

    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::DoorsReceived {
                distributor_name,
                reason,
                ..
            } => format!("{distributor_name} sent you doors: {reason}"),
            Self::DoorsGranted { doors, .. } => {
                format!("An administrator added {doors} doors to your balance")
            }
            Self::PrizeWon {
                prize_name,
                reward_code,
            } => format!("{prize_name} (code {reward_code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doors_received_serializes_with_type_tag() {
        let event = NotificationEvent::DoorsReceived {
            distribution_id: DistributionId::new(9),
            distributor_id: UserId::new(1),
            distributor_name: "Sam".into(),
            doors: 3,
            reason: "bonus".into(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DoorsReceived");
        assert_eq!(json["payload"]["doors"], 3);
        assert_eq!(event.title(), "You received 3 doors!");
        assert_eq!(event.body(), "Sam sent you doors: bonus");
    }
}
