mod common;

use common::{seed_distributor, seed_named, seed_organization, seed_user, test_config, test_store};
use opendoors::AppState;
use opendoors::domain::{DisplayName, UserId};
use opendoors::services::{DistributionService, HistoryService, SendDoorsRequest};

async fn send(state: &AppState, from: UserId, to: UserId, doors: i32, reason: &str) {
    state
        .distribution_service
        .send_doors(SendDoorsRequest {
            distributor_id: from,
            recipient_id: to,
            doors_to_send: doors,
            reason: reason.to_string(),
        })
        .await
        .expect("send failed");
}

#[tokio::test]
async fn distributor_history_is_newest_first_with_recipient_names() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 10).await;
    let sam = seed_named(&store, "sam@example.com", "Sam", "Lee").await;
    let pat = seed_user(&store, "pat@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    send(&state, distributor.id, sam.id, 1, "first").await;
    send(&state, distributor.id, pat.id, 2, "second").await;

    let history = state
        .history_service
        .distributor_history(distributor.id)
        .await
        .unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].distribution.reason, "second");
    assert_eq!(history[0].recipient_name, DisplayName::Known("pat@example.com".into()));
    assert_eq!(history[1].distribution.reason, "first");
    assert_eq!(history[1].recipient_name, DisplayName::Known("Sam Lee".into()));
}

#[tokio::test]
async fn missing_recipient_profile_keeps_the_row() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let state = AppState::with_store(test_config(), store.clone());

    send(&state, distributor.id, UserId::new(4242), 2, "walk-in").await;

    let history = state
        .history_service
        .distributor_history(distributor.id)
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].recipient_name, DisplayName::Unknown);
    assert_eq!(history[0].recipient_name.to_string(), "Unknown");
}

#[tokio::test]
async fn received_history_names_the_distributor() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let sam = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    send(&state, distributor.id, sam.id, 3, "bonus").await;

    let received = state.history_service.received_history(sam.id).await.unwrap();

    assert_eq!(received.len(), 1);
    assert_eq!(received[0].distribution.doors_sent, 3);
    assert_eq!(received[0].distributor_name, DisplayName::Known("Dana Shore".into()));

    let nothing = state
        .history_service
        .received_history(distributor.id)
        .await
        .unwrap();
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn organization_views_resolve_both_sides_and_tally_distributors() {
    let store = test_store().await;
    let org = seed_organization(&store, "Downtown Arcade").await;
    let other_org = seed_organization(&store, "Uptown Arcade").await;
    let dana = seed_distributor(&store, "dana@example.com", Some(org.id), 10).await;
    let idle = seed_distributor(&store, "idle@example.com", Some(org.id), 10).await;
    let outsider = seed_distributor(&store, "out@example.com", Some(other_org.id), 10).await;
    let sam = seed_named(&store, "sam@example.com", "Sam", "Lee").await;
    let pat = seed_user(&store, "pat@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    send(&state, dana.id, sam.id, 2, "one").await;
    send(&state, dana.id, sam.id, 1, "two").await;
    send(&state, dana.id, pat.id, 4, "three").await;
    send(&state, outsider.id, sam.id, 5, "elsewhere").await;

    let rows = state
        .history_service
        .organization_distributions(org.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].distribution.reason, "three");
    assert_eq!(rows[0].distributor_name, DisplayName::Known("Dana Shore".into()));
    assert_eq!(rows[0].recipient_name, DisplayName::Known("pat@example.com".into()));

    let distributors = state
        .history_service
        .organization_distributors(org.id)
        .await
        .unwrap();
    assert_eq!(distributors.len(), 2);

    let dana_summary = distributors.iter().find(|d| d.profile.id == dana.id).unwrap();
    assert_eq!(dana_summary.total_doors_sent, 7);
    assert_eq!(dana_summary.unique_recipients, 2);
    assert_eq!(dana_summary.profile.doors_available, 3);

    let idle_summary = distributors.iter().find(|d| d.profile.id == idle.id).unwrap();
    assert_eq!(idle_summary.total_doors_sent, 0);
    assert_eq!(idle_summary.unique_recipients, 0);
}

#[tokio::test]
async fn organization_history_keeps_rows_for_missing_recipients() {
    let store = test_store().await;
    let org = seed_organization(&store, "Downtown Arcade").await;
    let dana = seed_distributor(&store, "dana@example.com", Some(org.id), 5).await;
    let sam = seed_named(&store, "sam@example.com", "Sam", "Lee").await;
    let state = AppState::with_store(test_config(), store.clone());

    send(&state, dana.id, sam.id, 1, "known").await;
    send(&state, dana.id, UserId::new(4242), 2, "walk-in").await;

    let rows = state
        .history_service
        .organization_distributions(org.id)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].distribution.reason, "walk-in");
    assert_eq!(rows[0].distributor_name, DisplayName::Known("Dana Shore".into()));
    assert_eq!(rows[0].recipient_name, DisplayName::Unknown);
    assert_eq!(rows[1].recipient_name, DisplayName::Known("Sam Lee".into()));
}
