use sqlx::PgPool;

use crate::error::Result;
use crate::models::Athlete;

/// Repository for Athlete database operations
pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all athletes with the NOC code of their country
    pub async fn list(&self) -> Result<Vec<Athlete>> {
        let athletes = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT a.athlete_id, a.name, a.country_id, c.noc, a.born_on, a.profile_url
            FROM athletes a
            LEFT JOIN countries c ON c.country_id = a.country_id
            ORDER BY a.name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(athletes)
    }
}
