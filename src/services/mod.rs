pub mod validation;

pub mod distribution_service;
pub mod distribution_service_impl;
pub use distribution_service::{DistributionError, DistributionService, SendDoorsRequest};
pub use distribution_service_impl::LedgerDistributionService;

pub mod history_service;
pub mod history_service_impl;
pub use history_service::{
    DistributorSummary, HistoryError, HistoryService, OrganizationDistribution,
    ReceivedDistribution, SentDistribution,
};
pub use history_service_impl::SeaOrmHistoryService;

pub mod game_service;
pub mod game_service_impl;
pub use game_service::{GameError, GamePlayView, GameService, PlayResult, UserStats};
pub use game_service_impl::SeaOrmGameService;

pub mod profile_service;
pub mod profile_service_impl;
pub use profile_service::{CreateProfileRequest, ProfileError, ProfileService};
pub use profile_service_impl::SeaOrmProfileService;
