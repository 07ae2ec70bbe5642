pub mod prelude;

pub mod distributor_members;
pub mod door_distributions;
pub mod earned_rewards;
pub mod game_plays;
pub mod notifications;
pub mod organizations;
pub mod prizes;
pub mod user_profiles;
pub mod user_rewards;
