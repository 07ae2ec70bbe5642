use sea_orm::entity::prelude::*;

/// Append-only ledger entry. Rows are never updated once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "door_distributions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub distributor_id: i32,

    pub recipient_id: i32,

    pub organization_id: Option<i32>,

    pub doors_sent: i32,

    pub reason: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
