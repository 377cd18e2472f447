use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardFilter {
    /// Number of rows to return, 10 when omitted
    pub limit: Option<usize>,
}

impl LeaderboardFilter {
    pub fn validate(&self) -> Result<(), String> {
        super::medals::validate_limit(self.limit)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(super::medals::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub player_id: Uuid,
    pub name: String,
    pub total_score: Decimal,
}
