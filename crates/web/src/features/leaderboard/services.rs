use podium_storage::{
    dto::leaderboard::{LeaderboardEntry, LeaderboardFilter},
    error::Result,
    repository::player::PlayerRepository,
    services::ranking::rank_players,
};
use sqlx::PgPool;

/// Players by total score, highest first
pub async fn get_leaderboard(
    pool: &PgPool,
    filter: &LeaderboardFilter,
) -> Result<Vec<LeaderboardEntry>> {
    let players = PlayerRepository::new(pool).list().await?;
    Ok(rank_players(players, Some(filter.limit())))
}
