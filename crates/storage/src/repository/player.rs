use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Player;

/// Repository for Player database operations
pub struct PlayerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all players
    pub async fn list(&self) -> Result<Vec<Player>> {
        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, name, registration_status,
                   COALESCE(total_score, 0) AS total_score
            FROM players
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(players)
    }

    /// Get a player by ID
    pub async fn find_by_id(&self, player_id: Uuid) -> Result<Player> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT player_id, name, registration_status,
                   COALESCE(total_score, 0) AS total_score
            FROM players
            WHERE player_id = $1
            "#,
        )
        .bind(player_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(player)
    }
}
