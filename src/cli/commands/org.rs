use crate::domain::{OrganizationId, UserId};
use crate::services::ProfileService;
use crate::state::AppState;

pub async fn cmd_org_add(
    state: &AppState,
    name: &str,
    description: Option<&str>,
) -> anyhow::Result<()> {
    let org = state
        .profile_service
        .create_organization(name, description)
        .await?;

    println!("✓ Created organization #{}: {}", org.id, org.name);
    Ok(())
}

pub async fn cmd_org_add_distributor(
    state: &AppState,
    organization: i32,
    user: i32,
) -> anyhow::Result<()> {
    let org = state
        .profile_service
        .get_organization(OrganizationId::new(organization))
        .await?;
    let profile = state
        .profile_service
        .add_distributor(org.id, UserId::new(user))
        .await?;

    println!("✓ {} now distributes for {}", profile.display_name(), org.name);
    Ok(())
}
