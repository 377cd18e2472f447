use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One player's podium guess for one event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Pick {
    pub pick_id: Uuid,
    pub player_id: Uuid,
    pub event_id: Uuid,
    pub gold_country_id: Option<Uuid>,
    pub silver_country_id: Option<Uuid>,
    pub bronze_country_id: Option<Uuid>,
    /// Points awarded by the store once the event is decided
    pub points: Decimal,
    pub updated_at: Option<DateTime<Utc>>,
}
