use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Athlete {
    pub athlete_id: Uuid,
    pub name: String,
    pub country_id: Option<Uuid>,
    /// NOC code looked up through the athlete's country, when linked
    pub noc: Option<String>,
    pub born_on: Option<NaiveDate>,
    pub profile_url: Option<String>,
}
