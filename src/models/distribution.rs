use serde::{Deserialize, Serialize};

use crate::domain::{DistributionId, OrganizationId, UserId};
use crate::entities::door_distributions;

/// A committed ledger entry: `doors_sent` doors moved from a distributor to
/// a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorDistribution {
    pub id: DistributionId,
    pub distributor_id: UserId,
    pub recipient_id: UserId,
    pub organization_id: Option<OrganizationId>,
    pub doors_sent: i32,
    pub reason: String,
    pub created_at: String,
}

impl From<door_distributions::Model> for DoorDistribution {
    fn from(model: door_distributions::Model) -> Self {
        Self {
            id: DistributionId::new(model.id),
            distributor_id: UserId::new(model.distributor_id),
            recipient_id: UserId::new(model.recipient_id),
            organization_id: model.organization_id.map(OrganizationId::new),
            doors_sent: model.doors_sent,
            reason: model.reason,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDistribution {
    pub distributor_id: UserId,
    pub recipient_id: UserId,
    pub organization_id: Option<OrganizationId>,
    pub doors_sent: i32,
    pub reason: String,
}
