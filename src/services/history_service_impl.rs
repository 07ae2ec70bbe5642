//! `SeaORM` implementation of the `HistoryService` trait.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::db::Store;
use crate::domain::{DisplayName, OrganizationId, UserId};
use crate::models::distribution::DoorDistribution;
use crate::services::history_service::{
    DistributorSummary, HistoryError, HistoryService, OrganizationDistribution,
    ReceivedDistribution, SentDistribution,
};

pub struct SeaOrmHistoryService {
    store: Store,
}

impl SeaOrmHistoryService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// One profile read for every distinct id in `ids`.
    async fn names_for(
        &self,
        ids: impl IntoIterator<Item = UserId>,
    ) -> Result<NameLookup, HistoryError> {
        let unique: Vec<UserId> = ids
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if unique.is_empty() {
            return Ok(NameLookup::default());
        }

        let profiles = self.store.get_profiles_by_ids(&unique).await?;
        Ok(NameLookup(
            profiles
                .into_iter()
                .map(|p| (p.id, p.display_name()))
                .collect(),
        ))
    }
}

#[derive(Default)]
struct NameLookup(HashMap<UserId, String>);

impl NameLookup {
    fn get(&self, id: UserId) -> DisplayName {
        self.0
            .get(&id)
            .map_or(DisplayName::Unknown, |name| DisplayName::Known(name.clone()))
    }
}

/// Total doors sent and distinct recipients per distributor.
fn tally(distributions: &[DoorDistribution]) -> HashMap<UserId, (i64, HashSet<UserId>)> {
    let mut totals: HashMap<UserId, (i64, HashSet<UserId>)> = HashMap::new();
    for d in distributions {
        let entry = totals.entry(d.distributor_id).or_default();
        entry.0 += i64::from(d.doors_sent);
        entry.1.insert(d.recipient_id);
    }
    totals
}

#[async_trait]
impl HistoryService for SeaOrmHistoryService {
    async fn distributor_history(
        &self,
        distributor_id: UserId,
    ) -> Result<Vec<SentDistribution>, HistoryError> {
        let distributions = self.store.distributions_sent_by(distributor_id).await?;
        let names = self
            .names_for(distributions.iter().map(|d| d.recipient_id))
            .await?;

        Ok(distributions
            .into_iter()
            .map(|distribution| SentDistribution {
                recipient_name: names.get(distribution.recipient_id),
                distribution,
            })
            .collect())
    }

    async fn received_history(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ReceivedDistribution>, HistoryError> {
        let distributions = self.store.distributions_received_by(user_id).await?;
        let names = self
            .names_for(distributions.iter().map(|d| d.distributor_id))
            .await?;

        Ok(distributions
            .into_iter()
            .map(|distribution| ReceivedDistribution {
                distributor_name: names.get(distribution.distributor_id),
                distribution,
            })
            .collect())
    }

    async fn organization_distributions(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<OrganizationDistribution>, HistoryError> {
        let distributions = self
            .store
            .organization_distributions(organization_id)
            .await?;
        let names = self
            .names_for(
                distributions
                    .iter()
                    .flat_map(|d| [d.distributor_id, d.recipient_id]),
            )
            .await?;

        Ok(distributions
            .into_iter()
            .map(|distribution| OrganizationDistribution {
                distributor_name: names.get(distribution.distributor_id),
                recipient_name: names.get(distribution.recipient_id),
                distribution,
            })
            .collect())
    }

    async fn organization_distributors(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<DistributorSummary>, HistoryError> {
        let (distributors, distributions) = tokio::join!(
            self.store.list_organization_distributors(organization_id),
            self.store.organization_distributions(organization_id)
        );
        let distributors = distributors?;
        let totals = tally(&distributions?);

        Ok(distributors
            .into_iter()
            .map(|profile| {
                let (total_doors_sent, unique_recipients) = totals
                    .get(&profile.id)
                    .map_or((0, 0), |(doors, recipients)| (*doors, recipients.len()));
                DistributorSummary {
                    display_name: profile.display_name(),
                    profile,
                    total_doors_sent,
                    unique_recipients,
                }
            })
            .collect())
    }
}
