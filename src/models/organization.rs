use serde::{Deserialize, Serialize};

use crate::domain::OrganizationId;
use crate::entities::organizations;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<organizations::Model> for Organization {
    fn from(model: organizations::Model) -> Self {
        Self {
            id: OrganizationId::new(model.id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
        }
    }
}
