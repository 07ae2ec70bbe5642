use sea_orm::entity::prelude::*;

/// One row per granted door unit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "earned_rewards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    /// Always 1.
    pub doors_earned: i32,

    pub source_type: String,

    pub source_name: String,

    pub description: String,

    pub claimed: bool,

    pub created_at: String,

    pub expires_at: String,

    /// Non-owning back-reference to `door_distributions`.
    pub distribution_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
