use sqlx::PgPool;

use crate::error::Result;
use crate::models::Country;

/// Repository for Country database operations
pub struct CountryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CountryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all countries, alphabetically
    pub async fn list(&self) -> Result<Vec<Country>> {
        let countries = sqlx::query_as::<_, Country>(
            r#"
            SELECT country_id, name, noc
            FROM countries
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(countries)
    }
}
