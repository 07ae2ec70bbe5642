use crate::domain::{PrizeId, UserId};
use crate::services::GameService;
use crate::state::AppState;

pub async fn cmd_play(
    state: &AppState,
    user: i32,
    prize: Option<i32>,
    win: bool,
) -> anyhow::Result<()> {
    let result = state
        .game_service
        .record_game_play(UserId::new(user), prize.map(PrizeId::new), win)
        .await?;

    match result.reward {
        Some(reward) => println!("🎉 Winner! Reward code: {}", reward.reward_code),
        None if result.play.win => println!("🎉 Winner!"),
        None => println!("No luck this time (play #{}).", result.play.id),
    }
    Ok(())
}

pub async fn cmd_plays(state: &AppState, user: i32) -> anyhow::Result<()> {
    let plays = state.game_service.user_game_plays(UserId::new(user)).await?;

    if plays.is_empty() {
        println!("No game plays yet.");
        return Ok(());
    }

    println!("Recent plays ({}):", plays.len());
    println!("{:-<70}", "");
    for view in plays {
        let prize = view.prize.as_ref().map_or("-", |p| p.name.as_str());
        let outcome = if view.play.win { "WIN " } else { "lose" };
        println!("• [{outcome}] {prize} | {}", view.play.created_at);
    }
    Ok(())
}

pub async fn cmd_stats(state: &AppState, user: i32) -> anyhow::Result<()> {
    let stats = state.game_service.user_stats(UserId::new(user)).await?;

    println!("Games played:    {}", stats.games_played);
    println!("Rewards earned:  {}", stats.rewards_earned);
    println!("Rewards claimed: {}", stats.rewards_claimed);
    Ok(())
}

pub async fn cmd_prize_add(
    state: &AppState,
    name: &str,
    description: Option<&str>,
    image_url: Option<&str>,
) -> anyhow::Result<()> {
    let prize = state
        .game_service
        .create_prize(name, description, image_url)
        .await?;

    println!("✓ Created prize #{}: {}", prize.id, prize.name);
    Ok(())
}
