//! End-to-end tests for sending doors through the ledger.

mod common;

use async_trait::async_trait;
use chrono::DateTime;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{seed_distributor, seed_organization, seed_user, test_config, test_store};
use opendoors::AppState;
use opendoors::db::{LedgerStore, Store, StoreError};
use opendoors::domain::UserId;
use opendoors::domain::events::NotificationEvent;
use opendoors::models::distribution::{DoorDistribution, NewDistribution};
use opendoors::models::profile::UserProfile;
use opendoors::models::reward::RewardGrant;
use opendoors::services::{DistributionError, DistributionService, SendDoorsRequest};

fn send(from: UserId, to: UserId, doors: i32, reason: &str) -> SendDoorsRequest {
    SendDoorsRequest {
        distributor_id: from,
        recipient_id: to,
        doors_to_send: doors,
        reason: reason.to_string(),
    }
}

async fn balance(store: &Store, id: UserId) -> (i32, i32) {
    let profile = store.get_profile(id).await.unwrap().unwrap();
    (profile.doors_available, profile.doors_distributed)
}

#[derive(Clone, Copy, Default)]
enum PrimaryFailure {
    #[default]
    None,
    Rejected,
    Insufficient,
}

/// Delegates to a real store, failing the steps it is told to fail.
#[derive(Default)]
struct FlakyStore {
    inner: Option<Store>,
    primary: PrimaryFailure,
    fail_notifications: bool,
    fail_rewards: bool,
    procedure_calls: AtomicUsize,
}

impl FlakyStore {
    fn over(store: Store) -> Self {
        Self {
            inner: Some(store),
            ..Default::default()
        }
    }

    fn store(&self) -> &Store {
        self.inner.as_ref().unwrap()
    }
}

#[async_trait]
impl LedgerStore for FlakyStore {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, StoreError> {
        self.store().find_profile(id).await
    }

    async fn record_distribution(
        &self,
        new: &NewDistribution,
    ) -> Result<DoorDistribution, StoreError> {
        match self.primary {
            PrimaryFailure::None => self.store().record_distribution(new).await,
            PrimaryFailure::Rejected => Err(StoreError::PermissionDenied(
                "row-level policy rejected insert".into(),
            )),
            PrimaryFailure::Insufficient => Err(StoreError::InsufficientDoors),
        }
    }

    async fn record_distribution_via_procedure(
        &self,
        new: &NewDistribution,
    ) -> Result<DoorDistribution, StoreError> {
        self.procedure_calls.fetch_add(1, Ordering::SeqCst);
        self.store().record_distribution_via_procedure(new).await
    }

    async fn enqueue_notification(
        &self,
        user_id: UserId,
        event: &NotificationEvent,
    ) -> Result<(), StoreError> {
        if self.fail_notifications {
            return Err(StoreError::Database("notifications unavailable".into()));
        }
        self.store().enqueue_notification(user_id, event).await
    }

    async fn grant_rewards(&self, grant: &RewardGrant) -> Result<u64, StoreError> {
        if self.fail_rewards {
            return Err(StoreError::Database("reward insert failed".into()));
        }
        self.store().grant_rewards(grant).await
    }
}

#[tokio::test]
async fn sending_three_of_five_doors_debits_and_rewards() {
    let store = test_store().await;
    let org = seed_organization(&store, "Downtown Arcade").await;
    let distributor = seed_distributor(&store, "dana@example.com", Some(org.id), 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    let distribution = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 3, "bonus"))
        .await
        .unwrap();

    assert_eq!(distribution.doors_sent, 3);
    assert_eq!(distribution.reason, "bonus");
    assert_eq!(distribution.organization_id, Some(org.id));
    assert_eq!(balance(&store, distributor.id).await, (2, 3));

    let rewards = store.earned_rewards_for_user(recipient.id).await.unwrap();
    assert_eq!(rewards.len(), 3);
    for reward in &rewards {
        assert_eq!(reward.doors_earned, 1);
        assert_eq!(reward.source_type, "distributor");
        assert_eq!(reward.source_name, "Dana Shore");
        assert_eq!(reward.description, "bonus");
        assert!(!reward.claimed);
        assert_eq!(reward.distribution_id, Some(distribution.id));

        let created = DateTime::parse_from_rfc3339(&reward.created_at).unwrap();
        let expires = DateTime::parse_from_rfc3339(&reward.expires_at).unwrap();
        assert_eq!((expires - created).num_days(), 30);
    }

    let notifications = store.notifications_for_user(recipient.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "You received 3 doors!");
    assert!(notifications[0].body.contains("Dana Shore"));
}

#[tokio::test]
async fn overdraw_writes_nothing() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 2).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    let result = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 5, "bonus"))
        .await;

    assert!(matches!(result, Err(DistributionError::InsufficientDoors)));
    assert_eq!(balance(&store, distributor.id).await, (2, 0));
    assert!(store.distributions_sent_by(distributor.id).await.unwrap().is_empty());
    assert!(store.earned_rewards_for_user(recipient.id).await.unwrap().is_empty());
    assert!(store.notifications_for_user(recipient.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    for request in [
        send(distributor.id, recipient.id, 0, "bonus"),
        send(distributor.id, recipient.id, -2, "bonus"),
        send(distributor.id, recipient.id, 1, "   "),
    ] {
        let result = state.distribution_service.send_doors(request).await;
        assert!(matches!(result, Err(DistributionError::Validation(_))));
    }

    let missing = state
        .distribution_service
        .send_doors(send(UserId::new(9999), recipient.id, 1, "bonus"))
        .await;
    assert!(matches!(missing, Err(DistributionError::DistributorNotFound)));

    assert_eq!(balance(&store, distributor.id).await, (5, 0));
}

#[tokio::test]
async fn identical_sends_create_two_distributions() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    let first = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 1, "welcome"))
        .await
        .unwrap();
    let second = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 1, "welcome"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.distributions_sent_by(distributor.id).await.unwrap().len(), 2);
    assert_eq!(balance(&store, distributor.id).await, (3, 2));
}

#[tokio::test]
async fn reward_failure_keeps_committed_distribution() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let ledger = Arc::new(FlakyStore {
        fail_rewards: true,
        ..FlakyStore::over(store.clone())
    });
    let state = AppState::with_ledger(test_config(), store.clone(), ledger);

    let result = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 3, "bonus"))
        .await;

    let distribution_id = match result {
        Err(DistributionError::RewardGrantFailed {
            distribution_id, ..
        }) => distribution_id,
        other => panic!("expected RewardGrantFailed, got {other:?}"),
    };

    let recorded = store.get_distribution(distribution_id).await.unwrap();
    assert!(recorded.is_some());
    assert_eq!(balance(&store, distributor.id).await, (2, 3));
    assert!(store.earned_rewards_for_user(recipient.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_primary_write_falls_back_once() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let ledger = Arc::new(FlakyStore {
        primary: PrimaryFailure::Rejected,
        ..FlakyStore::over(store.clone())
    });
    let state = AppState::with_ledger(test_config(), store.clone(), ledger.clone());

    let distribution = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 4, "volunteer shift"))
        .await
        .unwrap();

    assert_eq!(ledger.procedure_calls.load(Ordering::SeqCst), 1);
    assert_eq!(distribution.doors_sent, 4);
    assert_eq!(balance(&store, distributor.id).await, (1, 4));
    assert_eq!(store.earned_rewards_for_user(recipient.id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn insufficient_primary_write_does_not_fall_back() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let ledger = Arc::new(FlakyStore {
        primary: PrimaryFailure::Insufficient,
        ..FlakyStore::over(store.clone())
    });
    let state = AppState::with_ledger(test_config(), store.clone(), ledger.clone());

    let result = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 2, "bonus"))
        .await;

    assert!(matches!(result, Err(DistributionError::InsufficientDoors)));
    assert_eq!(ledger.procedure_calls.load(Ordering::SeqCst), 0);
    assert_eq!(balance(&store, distributor.id).await, (5, 0));
}

#[tokio::test]
async fn notification_failure_does_not_fail_the_send() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let ledger = Arc::new(FlakyStore {
        fail_notifications: true,
        ..FlakyStore::over(store.clone())
    });
    let state = AppState::with_ledger(test_config(), store.clone(), ledger);

    let result = state
        .distribution_service
        .send_doors(send(distributor.id, recipient.id, 2, "bonus"))
        .await;

    assert!(result.is_ok());
    assert!(store.notifications_for_user(recipient.id).await.unwrap().is_empty());
    assert_eq!(store.earned_rewards_for_user(recipient.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_sends_never_overdraw() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 10).await;
    let recipient = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    let sends = (0..6).map(|i| {
        let service = state.distribution_service.clone();
        let request = send(distributor.id, recipient.id, 3, &format!("race {i}"));
        async move { service.send_doors(request).await }
    });
    let results = futures::future::join_all(sends).await;

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    for result in &results {
        assert!(matches!(
            result,
            Ok(_) | Err(DistributionError::InsufficientDoors)
        ));
    }

    let (available, distributed) = balance(&store, distributor.id).await;
    let sent = i32::try_from(succeeded).unwrap() * 3;
    assert_eq!(succeeded, 3);
    assert_eq!(available, 10 - sent);
    assert_eq!(distributed, sent);
    assert!(available >= 0);
}
