use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Organizations)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(UserProfiles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(DistributorMembers)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(DoorDistributions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(EarnedRewards)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Prizes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(GamePlays)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(UserRewards)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Notifications)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRewards).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePlays).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Prizes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EarnedRewards).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DoorDistributions).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DistributorMembers).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
