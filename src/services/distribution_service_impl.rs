//! Ledger-backed implementation of the `DistributionService` trait.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::LedgerConfig;
use crate::db::{LedgerStore, StoreError};
use crate::domain::events::NotificationEvent;
use crate::models::distribution::{DoorDistribution, NewDistribution};
use crate::models::profile::UserProfile;
use crate::models::reward::RewardGrant;
use crate::services::distribution_service::{
    DistributionError, DistributionService, SendDoorsRequest,
};
use crate::services::validation::{validate_door_count, validate_reason};

pub struct LedgerDistributionService {
    store: Arc<dyn LedgerStore>,
    config: LedgerConfig,
}

impl LedgerDistributionService {
    #[must_use]
    pub fn new(store: Arc<dyn LedgerStore>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Primary write, then one attempt through the privileged path if the
    /// primary was rejected. An insufficient balance is final either way.
    async fn record(&self, new: &NewDistribution) -> Result<DoorDistribution, DistributionError> {
        match self.store.record_distribution(new).await {
            Ok(distribution) => Ok(distribution),
            Err(StoreError::InsufficientDoors) => Err(DistributionError::InsufficientDoors),
            Err(primary) => {
                warn!(
                    distributor_id = %new.distributor_id,
                    error = %primary,
                    "Distribution insert rejected, using procedure fallback"
                );
                metrics::counter!("opendoors_fallback_records_total").increment(1);

                self.store
                    .record_distribution_via_procedure(new)
                    .await
                    .map_err(|fallback| {
                        error!(
                            distributor_id = %new.distributor_id,
                            primary_error = %primary,
                            error = %fallback,
                            "Procedure fallback failed"
                        );
                        DistributionError::from(fallback)
                    })
            }
        }
    }

    /// Grant and expiry timestamps for rewards issued now. Fails instead of
    /// overflowing so nothing is written with an unusable expiry.
    fn reward_window(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), DistributionError> {
        let days = self.config.reward_expiry_days;
        let granted_at = Utc::now();
        let expires_at = TimeDelta::try_days(days)
            .and_then(|ttl| granted_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                DistributionError::Configuration(format!(
                    "reward expiry of {days} days is out of range"
                ))
            })?;
        Ok((granted_at, expires_at))
    }

    fn sender_name(&self, distributor: &UserProfile) -> String {
        let name = distributor.display_name();
        if name.trim().is_empty() {
            self.config.unknown_distributor_name.clone()
        } else {
            name
        }
    }

    async fn notify_recipient(&self, distribution: &DoorDistribution, distributor_name: &str) {
        let event = NotificationEvent::DoorsReceived {
            distribution_id: distribution.id,
            distributor_id: distribution.distributor_id,
            distributor_name: distributor_name.to_string(),
            doors: distribution.doors_sent,
            reason: distribution.reason.clone(),
        };

        if let Err(e) = self
            .store
            .enqueue_notification(distribution.recipient_id, &event)
            .await
        {
            warn!(
                distribution_id = %distribution.id,
                recipient_id = %distribution.recipient_id,
                error = %e,
                "Failed to queue recipient notification"
            );
            metrics::counter!("opendoors_best_effort_failures_total", "step" => "notification")
                .increment(1);
        }
    }
}

#[async_trait]
impl DistributionService for LedgerDistributionService {
    async fn send_doors(
        &self,
        request: SendDoorsRequest,
    ) -> Result<DoorDistribution, DistributionError> {
        let doors = validate_door_count(request.doors_to_send)?;
        let reason = validate_reason(&request.reason)?.to_string();

        let distributor = self
            .store
            .find_profile(request.distributor_id)
            .await?
            .ok_or(DistributionError::DistributorNotFound)?;

        if doors > distributor.doors_available {
            info!(
                distributor_id = %distributor.id,
                requested = doors,
                available = distributor.doors_available,
                "Rejected distribution: not enough doors"
            );
            return Err(DistributionError::InsufficientDoors);
        }

        let (granted_at, expires_at) = self.reward_window()?;

        let new = NewDistribution {
            distributor_id: distributor.id,
            recipient_id: request.recipient_id,
            organization_id: distributor.organization_id,
            doors_sent: doors,
            reason,
        };
        let distribution = self.record(&new).await?;

        info!(
            distribution_id = %distribution.id,
            distributor_id = %distribution.distributor_id,
            recipient_id = %distribution.recipient_id,
            doors,
            "Doors distributed"
        );
        metrics::counter!("opendoors_distributions_total").increment(1);
        metrics::counter!("opendoors_doors_sent_total")
            .increment(u64::try_from(doors).unwrap_or(0));

        let distributor_name = self.sender_name(&distributor);
        self.notify_recipient(&distribution, &distributor_name).await;

        let grant = RewardGrant {
            user_id: distribution.recipient_id,
            doors,
            source_name: distributor_name,
            description: distribution.reason.clone(),
            distribution_id: Some(distribution.id),
            granted_at,
            expires_at,
        };

        // Committed ledger state is not compensated if this fails.
        if let Err(e) = self.store.grant_rewards(&grant).await {
            error!(
                distribution_id = %distribution.id,
                recipient_id = %distribution.recipient_id,
                error = %e,
                "Reward grant failed after distribution was committed"
            );
            metrics::counter!("opendoors_reward_grant_failures_total").increment(1);
            return Err(DistributionError::RewardGrantFailed {
                distribution_id: distribution.id,
                message: e.to_string(),
            });
        }

        Ok(distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DistributionId, UserId, UserType};
    use std::sync::Mutex;

    /// In-memory stand-in that records which steps ran.
    #[derive(Default)]
    struct RecordingStore {
        profile: Option<UserProfile>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingStore {
        fn with_balance(doors: i32) -> Self {
            Self {
                profile: Some(UserProfile {
                    id: UserId::new(1),
                    email: "d@example.com".into(),
                    first_name: None,
                    last_name: None,
                    user_type: UserType::Distributor,
                    organization_id: None,
                    doors_available: doors,
                    doors_distributed: 0,
                    created_at: String::new(),
                }),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LedgerStore for RecordingStore {
        async fn find_profile(&self, _id: UserId) -> Result<Option<UserProfile>, StoreError> {
            self.calls.lock().unwrap().push("find_profile");
            Ok(self.profile.clone())
        }

        async fn record_distribution(
            &self,
            new: &NewDistribution,
        ) -> Result<DoorDistribution, StoreError> {
            self.calls.lock().unwrap().push("record");
            Ok(DoorDistribution {
                id: DistributionId::new(1),
                distributor_id: new.distributor_id,
                recipient_id: new.recipient_id,
                organization_id: new.organization_id,
                doors_sent: new.doors_sent,
                reason: new.reason.clone(),
                created_at: String::new(),
            })
        }

        async fn record_distribution_via_procedure(
            &self,
            _new: &NewDistribution,
        ) -> Result<DoorDistribution, StoreError> {
            self.calls.lock().unwrap().push("procedure");
            Err(StoreError::Database("unexpected".into()))
        }

        async fn enqueue_notification(
            &self,
            _user_id: UserId,
            _event: &NotificationEvent,
        ) -> Result<(), StoreError> {
            self.calls.lock().unwrap().push("notify");
            Ok(())
        }

        async fn grant_rewards(&self, grant: &RewardGrant) -> Result<u64, StoreError> {
            self.calls.lock().unwrap().push("grant");
            Ok(u64::try_from(grant.doors).unwrap())
        }
    }

    fn request(doors: i32, reason: &str) -> SendDoorsRequest {
        SendDoorsRequest {
            distributor_id: UserId::new(1),
            recipient_id: UserId::new(2),
            doors_to_send: doors,
            reason: reason.to_string(),
        }
    }

    #[tokio::test]
    async fn validation_runs_before_any_store_call() {
        let store = Arc::new(RecordingStore::with_balance(5));
        let service = LedgerDistributionService::new(store.clone(), LedgerConfig::default());

        let zero = service.send_doors(request(0, "bonus")).await;
        assert!(matches!(zero, Err(DistributionError::Validation(_))));

        let blank = service.send_doors(request(1, "  ")).await;
        assert!(matches!(blank, Err(DistributionError::Validation(_))));

        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn steps_run_in_ledger_order() {
        let store = Arc::new(RecordingStore::with_balance(5));
        let service = LedgerDistributionService::new(store.clone(), LedgerConfig::default());

        let distribution = service.send_doors(request(3, " bonus ")).await.unwrap();

        assert_eq!(distribution.reason, "bonus");
        assert_eq!(store.calls(), vec!["find_profile", "record", "notify", "grant"]);
    }

    #[tokio::test]
    async fn missing_distributor_is_reported() {
        let store = Arc::new(RecordingStore::default());
        let service = LedgerDistributionService::new(store.clone(), LedgerConfig::default());

        let result = service.send_doors(request(1, "bonus")).await;

        assert!(matches!(result, Err(DistributionError::DistributorNotFound)));
        assert_eq!(store.calls(), vec!["find_profile"]);
    }

    #[tokio::test]
    async fn overdraw_is_rejected_before_writing() {
        let store = Arc::new(RecordingStore::with_balance(2));
        let service = LedgerDistributionService::new(store.clone(), LedgerConfig::default());

        let result = service.send_doors(request(5, "bonus")).await;

        assert!(matches!(result, Err(DistributionError::InsufficientDoors)));
        assert_eq!(store.calls(), vec!["find_profile"]);
    }

    #[tokio::test]
    async fn unrepresentable_expiry_fails_before_recording() {
        let store = Arc::new(RecordingStore::with_balance(5));
        let config = LedgerConfig {
            reward_expiry_days: 100_000_000,
            ..LedgerConfig::default()
        };
        let service = LedgerDistributionService::new(store.clone(), config);

        let result = service.send_doors(request(3, "bonus")).await;

        assert!(matches!(result, Err(DistributionError::Configuration(_))));
        assert_eq!(store.calls(), vec!["find_profile"]);
    }
}
