use std::sync::Arc;

use crate::config::Config;
use crate::db::{LedgerStore, Store};
use crate::services::{
    DistributionService, GameService, HistoryService, LedgerDistributionService, ProfileService,
    SeaOrmGameService, SeaOrmHistoryService, SeaOrmProfileService,
};

/// Every service the application uses, built once over a shared store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    pub distribution_service: Arc<dyn DistributionService>,

    pub history_service: Arc<dyn HistoryService>,

    pub game_service: Arc<dyn GameService>,

    pub profile_service: Arc<dyn ProfileService>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires the services over an already-connected store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let ledger: Arc<dyn LedgerStore> = Arc::new(store.clone());
        Self::with_ledger(config, store, ledger)
    }

    /// Like [`Self::with_store`], but the distribution workflow writes
    /// through `ledger` instead of the store directly.
    #[must_use]
    pub fn with_ledger(config: Config, store: Store, ledger: Arc<dyn LedgerStore>) -> Self {
        let distribution_service = Arc::new(LedgerDistributionService::new(
            ledger,
            config.ledger.clone(),
        )) as Arc<dyn DistributionService>;

        let history_service =
            Arc::new(SeaOrmHistoryService::new(store.clone())) as Arc<dyn HistoryService>;

        let game_service = Arc::new(SeaOrmGameService::new(
            store.clone(),
            config.history.clone(),
        )) as Arc<dyn GameService>;

        let profile_service = Arc::new(SeaOrmProfileService::new(
            store.clone(),
            config.retry.policy(),
        )) as Arc<dyn ProfileService>;

        Self {
            config: Arc::new(config),
            store,
            distribution_service,
            history_service,
            game_service,
            profile_service,
        }
    }
}
