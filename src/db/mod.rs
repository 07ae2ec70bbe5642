use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::events::NotificationEvent;
use crate::domain::{DistributionId, OrganizationId, PrizeId, UserId};
use crate::models::distribution::{DoorDistribution, NewDistribution};
use crate::models::game::{GamePlay, Prize};
use crate::models::organization::Organization;
use crate::models::profile::{NewUserProfile, UserProfile};
use crate::models::reward::{EarnedReward, RewardGrant};

pub mod ledger;
pub mod migrator;
pub mod repositories;

pub use ledger::{LedgerStore, StoreError};
pub use repositories::distribution::RecordOutcome;
pub use repositories::game::PlayOutcome;
pub use repositories::notification::QueuedNotification;

/// Handle to the relational store. Cheap to clone; all clones share the pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn profile_repo(&self) -> repositories::profile::ProfileRepository {
        repositories::profile::ProfileRepository::new(self.conn.clone())
    }

    fn organization_repo(&self) -> repositories::organization::OrganizationRepository {
        repositories::organization::OrganizationRepository::new(self.conn.clone())
    }

    fn distribution_repo(&self) -> repositories::distribution::DistributionRepository {
        repositories::distribution::DistributionRepository::new(self.conn.clone())
    }

    fn reward_repo(&self) -> repositories::reward::RewardRepository {
        repositories::reward::RewardRepository::new(self.conn.clone())
    }

    fn game_repo(&self) -> repositories::game::GameRepository {
        repositories::game::GameRepository::new(self.conn.clone())
    }

    fn notification_repo(&self) -> repositories::notification::NotificationRepository {
        repositories::notification::NotificationRepository::new(self.conn.clone())
    }

    // Profiles

    pub async fn get_profile(&self, id: UserId) -> Result<Option<UserProfile>> {
        self.profile_repo().get(id).await
    }

    pub async fn get_profile_by_email(&self, email: &str) -> Result<Option<UserProfile>> {
        self.profile_repo().get_by_email(email).await
    }

    pub async fn get_profiles_by_ids(&self, ids: &[UserId]) -> Result<Vec<UserProfile>> {
        self.profile_repo().get_by_ids(ids).await
    }

    pub async fn create_profile(&self, profile: &NewUserProfile) -> Result<UserProfile> {
        self.profile_repo().create(profile).await
    }

    pub async fn list_organization_distributors(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<UserProfile>> {
        self.profile_repo().list_distributors(organization_id).await
    }

    pub async fn add_doors(&self, id: UserId, doors: i32) -> Result<bool> {
        self.profile_repo().add_doors(id, doors).await
    }

    pub async fn assign_distributor(
        &self,
        id: UserId,
        organization_id: OrganizationId,
    ) -> Result<bool> {
        self.profile_repo()
            .assign_distributor(id, organization_id)
            .await
    }

    // Organizations

    pub async fn create_organization(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Organization> {
        self.organization_repo().create(name, description).await
    }

    pub async fn get_organization(&self, id: OrganizationId) -> Result<Option<Organization>> {
        self.organization_repo().get(id).await
    }

    pub async fn add_distributor_member(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<()> {
        self.organization_repo()
            .add_member(organization_id, user_id)
            .await
    }

    pub async fn distributor_member_ids(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<UserId>> {
        self.organization_repo().member_ids(organization_id).await
    }

    // Distributions

    pub async fn debit_and_record(&self, new: &NewDistribution) -> Result<RecordOutcome> {
        self.distribution_repo().record(new).await
    }

    pub async fn debit_and_record_via_procedure(
        &self,
        new: &NewDistribution,
    ) -> Result<RecordOutcome> {
        self.distribution_repo().record_via_procedure(new).await
    }

    pub async fn get_distribution(&self, id: DistributionId) -> Result<Option<DoorDistribution>> {
        self.distribution_repo().get(id).await
    }

    pub async fn distributions_sent_by(&self, distributor_id: UserId) -> Result<Vec<DoorDistribution>> {
        self.distribution_repo().sent_by(distributor_id).await
    }

    pub async fn distributions_received_by(
        &self,
        recipient_id: UserId,
    ) -> Result<Vec<DoorDistribution>> {
        self.distribution_repo().received_by(recipient_id).await
    }

    pub async fn organization_distributions(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DoorDistribution>> {
        self.distribution_repo()
            .for_organization(organization_id)
            .await
    }

    // Rewards

    pub async fn insert_earned_rewards(&self, grant: &RewardGrant) -> Result<u64> {
        self.reward_repo().grant(grant).await
    }

    pub async fn earned_rewards_for_user(&self, user_id: UserId) -> Result<Vec<EarnedReward>> {
        self.reward_repo().for_user(user_id).await
    }

    // Game

    pub async fn record_game_play(
        &self,
        user_id: UserId,
        prize_id: Option<PrizeId>,
        win: bool,
        reward_code: &str,
    ) -> Result<PlayOutcome> {
        self.game_repo()
            .record_play(user_id, prize_id, win, reward_code)
            .await
    }

    pub async fn recent_game_plays(&self, user_id: UserId, limit: u64) -> Result<Vec<GamePlay>> {
        self.game_repo().recent_plays(user_id, limit).await
    }

    pub async fn game_play_count(&self, user_id: UserId) -> Result<u64> {
        self.game_repo().play_count(user_id).await
    }

    pub async fn get_prizes_by_ids(&self, ids: &[PrizeId]) -> Result<Vec<Prize>> {
        self.game_repo().prizes_by_ids(ids).await
    }

    pub async fn get_prize(&self, id: PrizeId) -> Result<Option<Prize>> {
        self.game_repo().get_prize(id).await
    }

    pub async fn create_prize(
        &self,
        name: &str,
        description: Option<&str>,
        image_url: Option<&str>,
    ) -> Result<Prize> {
        self.game_repo()
            .create_prize(name, description, image_url)
            .await
    }

    // Notifications

    pub async fn queue_notification(&self, user_id: UserId, event: &NotificationEvent) -> Result<()> {
        self.notification_repo().enqueue(user_id, event).await
    }

    pub async fn notifications_for_user(&self, user_id: UserId) -> Result<Vec<QueuedNotification>> {
        self.notification_repo().for_user(user_id).await
    }
}
