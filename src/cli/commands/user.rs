use crate::domain::{UserId, UserType};
use crate::services::{CreateProfileRequest, ProfileService};
use crate::state::AppState;

pub async fn cmd_user_add(
    state: &AppState,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    user_type: UserType,
    doors: i32,
) -> anyhow::Result<()> {
    let profile = state
        .profile_service
        .create_profile(CreateProfileRequest {
            email,
            first_name,
            last_name,
            user_type,
            initial_doors: doors,
        })
        .await?;

    println!("✓ Created {} #{}: {}", profile.user_type, profile.id, profile.display_name());
    Ok(())
}

pub async fn cmd_user_show(state: &AppState, id: i32) -> anyhow::Result<()> {
    let profile = state.profile_service.get_profile(UserId::new(id)).await?;

    println!("{} (#{})", profile.display_name(), profile.id);
    println!("{:-<50}", "");
    println!("Email:        {}", profile.email);
    println!("Type:         {}", profile.user_type);
    if let Some(org) = profile.organization_id {
        println!("Organization: {org}");
    }
    println!("Doors:        {} available", profile.doors_available);
    if profile.is_distributor() {
        println!("Distributed:  {}", profile.doors_distributed);
    }
    Ok(())
}
