pub use super::distributor_members::Entity as DistributorMembers;
pub use super::door_distributions::Entity as DoorDistributions;
pub use super::earned_rewards::Entity as EarnedRewards;
pub use super::game_plays::Entity as GamePlays;
pub use super::notifications::Entity as Notifications;
pub use super::organizations::Entity as Organizations;
pub use super::prizes::Entity as Prizes;
pub use super::user_profiles::Entity as UserProfiles;
pub use super::user_rewards::Entity as UserRewards;
