use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::services::reconcile::PodiumPick;
use crate::services::status::EventStatus;

/// One event's podium guess; positions left out are treated as not chosen yet
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PickSubmission {
    pub event_id: Uuid,
    pub gold: Option<Uuid>,
    pub silver: Option<Uuid>,
    pub bronze: Option<Uuid>,
}

impl PickSubmission {
    pub fn podium(&self) -> PodiumPick {
        PodiumPick {
            gold: self.gold,
            silver: self.silver,
            bronze: self.bronze,
        }
    }
}

/// Request payload for saving a player's picks
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct SubmitPicksRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "Between 1 and 500 picks must be submitted"
    ))]
    pub picks: Vec<PickSubmission>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmitPicksResponse {
    pub created: usize,
    pub updated: usize,
    /// Picks left out because a podium position is still empty
    pub skipped_incomplete: usize,
    /// Picks left out because the event is already final
    pub skipped_frozen: usize,
}

/// A saved pick as listed for a player
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerPickEntry {
    pub pick_id: Uuid,
    pub event_id: Uuid,
    pub event_name: String,
    pub status: EventStatus,
    pub gold_country_id: Option<Uuid>,
    pub silver_country_id: Option<Uuid>,
    pub bronze_country_id: Option<Uuid>,
    pub points: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerPicksResponse {
    pub player_id: Uuid,
    pub name: String,
    pub total_points: Decimal,
    pub picks: Vec<PlayerPickEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_submission_rejected() {
        let request = SubmitPicksRequest { picks: vec![] };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_partial_submission_is_valid() {
        let request = SubmitPicksRequest {
            picks: vec![PickSubmission {
                event_id: Uuid::new_v4(),
                gold: Some(Uuid::new_v4()),
                silver: None,
                bronze: None,
            }],
        };
        assert!(request.validate().is_ok());
        assert!(request.picks[0].podium().complete().is_none());
    }
}
