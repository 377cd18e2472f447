use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const REGISTERED: &str = "registered";

/// A participant of the prediction game.
///
/// `total_score` is maintained by the store as the sum of the points of all
/// the player's picks; it is only ever read here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Player {
    pub player_id: Uuid,
    pub name: String,
    pub registration_status: String,
    pub total_score: Decimal,
}
