use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Pick;
use crate::models::player::REGISTERED;
use crate::services::reconcile::{CreateOp, UpdateOp};
use crate::traits::{PermissionCheck, PickStore};

/// Repository for Pick database operations
pub struct PickRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PickRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a player's picks, ordered by event name
    pub async fn list_for_player(&self, player_id: Uuid) -> Result<Vec<Pick>> {
        let picks = sqlx::query_as::<_, Pick>(
            r#"
            SELECT p.pick_id, p.player_id, p.event_id,
                   p.gold_country_id, p.silver_country_id, p.bronze_country_id,
                   COALESCE(p.points, 0) AS points, p.updated_at
            FROM picks p
            INNER JOIN events e ON e.event_id = p.event_id
            WHERE p.player_id = $1
            ORDER BY e.name
            "#,
        )
        .bind(player_id)
        .fetch_all(self.pool)
        .await?;

        Ok(picks)
    }
}

#[async_trait::async_trait]
impl<'a> PickStore for PickRepository<'a> {
    async fn check_create_permission(&self, player_id: Uuid) -> Result<PermissionCheck> {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT registration_status FROM players WHERE player_id = $1",
        )
        .bind(player_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(match status {
            None => PermissionCheck::denied("Player does not exist"),
            Some(status) if status == REGISTERED => PermissionCheck::granted(),
            Some(status) => PermissionCheck::denied(format!(
                "Player registration is '{status}', picks open once registration is complete"
            )),
        })
    }

    async fn create_many(&self, ops: &[CreateOp]) -> Result<Vec<Uuid>> {
        let mut tx = self.pool.begin().await?;
        let mut pick_ids = Vec::with_capacity(ops.len());

        for op in ops {
            let pick_id = sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO picks (
                    player_id, event_id, gold_country_id, silver_country_id, bronze_country_id
                )
                VALUES ($1, $2, $3, $4, $5)
                RETURNING pick_id
                "#,
            )
            .bind(op.player_id)
            .bind(op.event_id)
            .bind(op.podium.gold)
            .bind(op.podium.silver)
            .bind(op.podium.bronze)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                let error = StorageError::from(e);
                if error.is_unique_violation() {
                    return StorageError::ConstraintViolation(format!(
                        "A pick already exists for event {}",
                        op.event_id
                    ));
                }
                if error.is_foreign_key_violation() {
                    return StorageError::ConstraintViolation(format!(
                        "Pick for event {} references an unknown country",
                        op.event_id
                    ));
                }
                error
            })?;

            pick_ids.push(pick_id);
        }

        tx.commit().await?;
        Ok(pick_ids)
    }

    async fn update_many(&self, ops: &[UpdateOp]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for op in ops {
            let result = sqlx::query(
                r#"
                UPDATE picks
                SET gold_country_id = $2,
                    silver_country_id = $3,
                    bronze_country_id = $4,
                    updated_at = NOW()
                WHERE pick_id = $1 AND event_id = $5 AND player_id = $6
                "#,
            )
            .bind(op.pick_id)
            .bind(op.podium.gold)
            .bind(op.podium.silver)
            .bind(op.podium.bronze)
            .bind(op.event_id)
            .bind(op.player_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StorageError::NotFound);
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
