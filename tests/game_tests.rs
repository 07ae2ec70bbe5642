mod common;

use common::{seed_distributor, seed_user, test_config, test_store};
use opendoors::AppState;
use opendoors::domain::{PrizeId, UserId};
use opendoors::services::{
    DistributionService, GameError, GameService, SendDoorsRequest, UserStats,
};

#[tokio::test]
async fn playing_spends_a_door_and_issues_reward_code_on_win() {
    let store = test_store().await;
    let player = seed_user(&store, "sam@example.com", 2).await;
    let state = AppState::with_store(test_config(), store.clone());
    let prize = state
        .game_service
        .create_prize("Plush Bear", Some("Large"), None)
        .await
        .unwrap();

    let win = state
        .game_service
        .record_game_play(player.id, Some(prize.id), true)
        .await
        .unwrap();
    let reward = win.reward.expect("winning play should issue a reward");
    assert_eq!(reward.prize_id, prize.id);
    assert_eq!(reward.reward_code.len(), 32);

    let loss = state
        .game_service
        .record_game_play(player.id, Some(prize.id), false)
        .await
        .unwrap();
    assert!(loss.reward.is_none());

    let profile = store.get_profile(player.id).await.unwrap().unwrap();
    assert_eq!(profile.doors_available, 0);

    let notifications = store.notifications_for_user(player.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].body.contains(&reward.reward_code));
}

#[tokio::test]
async fn playing_without_doors_is_refused() {
    let store = test_store().await;
    let player = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    let result = state
        .game_service
        .record_game_play(player.id, None, false)
        .await;

    assert!(matches!(result, Err(GameError::NoDoorsAvailable)));
    assert_eq!(store.game_play_count(player.id).await.unwrap(), 0);
}

#[tokio::test]
async fn play_requests_are_checked() {
    let store = test_store().await;
    let player = seed_user(&store, "sam@example.com", 3).await;
    let state = AppState::with_store(test_config(), store.clone());

    let no_prize = state
        .game_service
        .record_game_play(player.id, None, true)
        .await;
    assert!(matches!(no_prize, Err(GameError::Validation(_))));

    let bad_prize = state
        .game_service
        .record_game_play(player.id, Some(PrizeId::new(77)), false)
        .await;
    assert!(matches!(bad_prize, Err(GameError::PrizeNotFound(_))));

    let nobody = state
        .game_service
        .record_game_play(UserId::new(999), None, false)
        .await;
    assert!(matches!(nobody, Err(GameError::UserNotFound(_))));

    let profile = store.get_profile(player.id).await.unwrap().unwrap();
    assert_eq!(profile.doors_available, 3);
}

#[tokio::test]
async fn recent_plays_are_capped_and_joined_with_prizes() {
    let store = test_store().await;
    let player = seed_user(&store, "sam@example.com", 30).await;
    let mut config = test_config();
    config.history.recent_game_plays = 5;
    let state = AppState::with_store(config, store.clone());
    let prize = state
        .game_service
        .create_prize("Sticker", None, None)
        .await
        .unwrap();

    for i in 0..7 {
        let prize_id = (i % 2 == 0).then_some(prize.id);
        state
            .game_service
            .record_game_play(player.id, prize_id, false)
            .await
            .unwrap();
    }

    let plays = state.game_service.user_game_plays(player.id).await.unwrap();

    assert_eq!(plays.len(), 5);
    assert!(plays.windows(2).all(|w| w[0].play.id > w[1].play.id));
    for view in &plays {
        assert_eq!(view.prize.is_some(), view.play.prize_id.is_some());
    }
}

#[tokio::test]
async fn stats_count_plays_and_rewards() {
    let store = test_store().await;
    let distributor = seed_distributor(&store, "dana@example.com", None, 5).await;
    let player = seed_user(&store, "sam@example.com", 0).await;
    let state = AppState::with_store(test_config(), store.clone());

    state
        .distribution_service
        .send_doors(SendDoorsRequest {
            distributor_id: distributor.id,
            recipient_id: player.id,
            doors_to_send: 3,
            reason: "bonus".to_string(),
        })
        .await
        .unwrap();
    store.add_doors(player.id, 2).await.unwrap();
    for _ in 0..2 {
        state
            .game_service
            .record_game_play(player.id, None, false)
            .await
            .unwrap();
    }

    let stats = state.game_service.user_stats(player.id).await.unwrap();

    assert_eq!(
        stats,
        UserStats {
            games_played: 2,
            rewards_earned: 3,
            rewards_claimed: 0,
        }
    );
}
