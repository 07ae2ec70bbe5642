use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: &[(&str, &str)] = &[
    (
        "idx_door_distributions_distributor",
        "CREATE INDEX IF NOT EXISTS idx_door_distributions_distributor ON door_distributions(distributor_id, created_at)",
    ),
    (
        "idx_door_distributions_recipient",
        "CREATE INDEX IF NOT EXISTS idx_door_distributions_recipient ON door_distributions(recipient_id, created_at)",
    ),
    (
        "idx_door_distributions_organization",
        "CREATE INDEX IF NOT EXISTS idx_door_distributions_organization ON door_distributions(organization_id, created_at)",
    ),
    (
        "idx_earned_rewards_user",
        "CREATE INDEX IF NOT EXISTS idx_earned_rewards_user ON earned_rewards(user_id)",
    ),
    (
        "idx_game_plays_user",
        "CREATE INDEX IF NOT EXISTS idx_game_plays_user ON game_plays(user_id, created_at)",
    ),
    (
        "idx_user_profiles_organization",
        "CREATE INDEX IF NOT EXISTS idx_user_profiles_organization ON user_profiles(organization_id, user_type)",
    ),
    (
        "idx_distributor_members_unique",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_distributor_members_unique ON distributor_members(organization_id, user_id)",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (_, create) in INDEXES {
            conn.execute_unprepared(create).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (name, _) in INDEXES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }

        Ok(())
    }
}
