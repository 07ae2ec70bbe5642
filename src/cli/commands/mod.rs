mod game;
mod history;
mod ledger;
mod org;
mod user;

pub use game::{cmd_play, cmd_plays, cmd_prize_add, cmd_stats};
pub use history::{
    cmd_distributors, cmd_history_distributor, cmd_history_organization, cmd_history_received,
};
pub use ledger::{cmd_grant, cmd_send};
pub use org::{cmd_org_add, cmd_org_add_distributor};
pub use user::{cmd_user_add, cmd_user_show};
