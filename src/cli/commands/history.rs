use crate::domain::{OrganizationId, UserId};
use crate::services::HistoryService;
use crate::state::AppState;

pub async fn cmd_history_distributor(state: &AppState, id: i32) -> anyhow::Result<()> {
    let rows = state
        .history_service
        .distributor_history(UserId::new(id))
        .await?;

    if rows.is_empty() {
        println!("No doors sent yet.");
        return Ok(());
    }

    println!("Doors sent ({}):", rows.len());
    println!("{:-<70}", "");
    for row in rows {
        let d = &row.distribution;
        println!("• {} doors → {}", d.doors_sent, row.recipient_name);
        println!("  {} | {}", d.reason, d.created_at);
    }
    Ok(())
}

pub async fn cmd_history_received(state: &AppState, id: i32) -> anyhow::Result<()> {
    let rows = state
        .history_service
        .received_history(UserId::new(id))
        .await?;

    if rows.is_empty() {
        println!("No doors received yet.");
        return Ok(());
    }

    println!("Doors received ({}):", rows.len());
    println!("{:-<70}", "");
    for row in rows {
        let d = &row.distribution;
        println!("• {} doors from {}", d.doors_sent, row.distributor_name);
        println!("  {} | {}", d.reason, d.created_at);
    }
    Ok(())
}

pub async fn cmd_history_organization(state: &AppState, id: i32) -> anyhow::Result<()> {
    let rows = state
        .history_service
        .organization_distributions(OrganizationId::new(id))
        .await?;

    if rows.is_empty() {
        println!("No distributions in this organization.");
        return Ok(());
    }

    println!("Organization distributions ({}):", rows.len());
    println!("{:-<70}", "");
    for row in rows {
        let d = &row.distribution;
        println!(
            "• {} → {}: {} doors",
            row.distributor_name, row.recipient_name, d.doors_sent
        );
        println!("  {} | {}", d.reason, d.created_at);
    }
    Ok(())
}

pub async fn cmd_distributors(state: &AppState, organization: i32) -> anyhow::Result<()> {
    let distributors = state
        .history_service
        .organization_distributors(OrganizationId::new(organization))
        .await?;

    if distributors.is_empty() {
        println!("No distributors in this organization.");
        return Ok(());
    }

    println!("Distributors ({}):", distributors.len());
    println!("{:-<70}", "");
    for d in distributors {
        println!("• {} (#{})", d.display_name, d.profile.id);
        println!(
            "  Sent: {} doors to {} recipients | Available: {}",
            d.total_doors_sent, d.unique_recipients, d.profile.doors_available
        );
    }
    Ok(())
}
