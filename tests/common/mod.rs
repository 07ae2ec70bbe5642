#![allow(dead_code)]

use opendoors::config::Config;
use opendoors::db::Store;
use opendoors::domain::{OrganizationId, UserType};
use opendoors::models::organization::Organization;
use opendoors::models::profile::{NewUserProfile, UserProfile};

/// Fresh file-backed store. A single connection keeps interleaved
/// transactions deterministic.
pub async fn test_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("opendoors-test-{}.db", uuid::Uuid::new_v4()));
    Store::with_pool_options(&format!("sqlite:{}", db_path.display()), 1, 1)
        .await
        .expect("failed to create test store")
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.retry.base_delay_ms = 1;
    config
}

pub async fn seed_user(store: &Store, email: &str, doors: i32) -> UserProfile {
    store
        .create_profile(&NewUserProfile {
            email: email.to_string(),
            doors_available: doors,
            ..Default::default()
        })
        .await
        .expect("failed to seed user")
}

pub async fn seed_named(store: &Store, email: &str, first: &str, last: &str) -> UserProfile {
    store
        .create_profile(&NewUserProfile {
            email: email.to_string(),
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            ..Default::default()
        })
        .await
        .expect("failed to seed named user")
}

pub async fn seed_distributor(
    store: &Store,
    email: &str,
    organization_id: Option<OrganizationId>,
    doors: i32,
) -> UserProfile {
    store
        .create_profile(&NewUserProfile {
            email: email.to_string(),
            first_name: Some("Dana".to_string()),
            last_name: Some("Shore".to_string()),
            user_type: UserType::Distributor,
            organization_id,
            doors_available: doors,
        })
        .await
        .expect("failed to seed distributor")
}

pub async fn seed_admin(store: &Store, email: &str) -> UserProfile {
    store
        .create_profile(&NewUserProfile {
            email: email.to_string(),
            user_type: UserType::Admin,
            ..Default::default()
        })
        .await
        .expect("failed to seed admin")
}

pub async fn seed_organization(store: &Store, name: &str) -> Organization {
    store
        .create_organization(name, None)
        .await
        .expect("failed to seed organization")
}
