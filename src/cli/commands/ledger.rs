use crate::domain::UserId;
use crate::services::{DistributionError, DistributionService, ProfileService, SendDoorsRequest};
use crate::state::AppState;

pub async fn cmd_grant(state: &AppState, admin: i32, user: i32, doors: i32) -> anyhow::Result<()> {
    let profile = state
        .profile_service
        .grant_doors(UserId::new(admin), UserId::new(user), doors)
        .await?;

    println!(
        "✓ Granted {doors} doors to {} (now {} available)",
        profile.display_name(),
        profile.doors_available
    );
    Ok(())
}

pub async fn cmd_send(
    state: &AppState,
    from: i32,
    to: i32,
    doors: i32,
    reason: &str,
) -> anyhow::Result<()> {
    let request = SendDoorsRequest {
        distributor_id: UserId::new(from),
        recipient_id: UserId::new(to),
        doors_to_send: doors,
        reason: reason.to_string(),
    };

    match state.distribution_service.send_doors(request).await {
        Ok(distribution) => {
            println!(
                "✓ Sent {} doors to user {} (distribution #{})",
                distribution.doors_sent, distribution.recipient_id, distribution.id
            );
            Ok(())
        }
        Err(DistributionError::RewardGrantFailed {
            distribution_id,
            message,
        }) => {
            println!("⚠ Distribution #{distribution_id} was recorded, but rewards were not granted.");
            anyhow::bail!("Reward grant failed: {message}")
        }
        Err(e) => Err(e.into()),
    }
}
