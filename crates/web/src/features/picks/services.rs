use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use podium_storage::{
    dto::picks::{
        PickSubmission, PlayerPickEntry, PlayerPicksResponse, SubmitPicksRequest,
        SubmitPicksResponse,
    },
    error::Result,
    repository::{event::EventRepository, pick::PickRepository, player::PlayerRepository},
    services::{
        reconcile::{PickLedger, PodiumPick, reconcile, submit},
        status::{EventStatus, StatusWindows, resolve_all},
    },
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiResult, WebError};

/// A player's picks with event status and awarded points
pub async fn list_player_picks(
    pool: &PgPool,
    player_id: Uuid,
    now: DateTime<Utc>,
) -> Result<PlayerPicksResponse> {
    let player = PlayerRepository::new(pool).find_by_id(player_id).await?;
    let picks = PickRepository::new(pool).list_for_player(player_id).await?;
    let events = EventRepository::new(pool).list(None).await?;

    let windows = StatusWindows::default();
    let events: HashMap<Uuid, (&str, EventStatus)> = events
        .iter()
        .map(|e| (e.event_id, (e.name.as_str(), windows.resolve_event(e, now))))
        .collect();

    let picks = picks
        .into_iter()
        .filter_map(|pick| {
            let &(event_name, status) = events.get(&pick.event_id)?;
            Some(PlayerPickEntry {
                pick_id: pick.pick_id,
                event_id: pick.event_id,
                event_name: event_name.to_string(),
                status,
                gold_country_id: pick.gold_country_id,
                silver_country_id: pick.silver_country_id,
                bronze_country_id: pick.bronze_country_id,
                points: pick.points,
            })
        })
        .collect();

    Ok(PlayerPicksResponse {
        player_id: player.player_id,
        name: player.name,
        total_points: player.total_score,
        picks,
    })
}

/// Saves the submitted picks, creating or updating as needed.
///
/// Event status and the pick ledger are read fresh from the store so that
/// picks on events closed since the form was loaded are left untouched.
pub async fn submit_picks(
    pool: &PgPool,
    player_id: Uuid,
    request: &SubmitPicksRequest,
    now: DateTime<Utc>,
) -> ApiResult<SubmitPicksResponse> {
    PlayerRepository::new(pool).find_by_id(player_id).await?;

    let events = EventRepository::new(pool).list(None).await?;
    let statuses = resolve_all(&events, &StatusWindows::default(), now);
    let desired = desired_picks(&request.picks, &statuses)?;

    let persisted = PickRepository::new(pool).list_for_player(player_id).await?;
    let mut ledger = PickLedger::from_picks(player_id, &persisted);

    let plan = reconcile(&desired, &ledger, &statuses);
    let report = submit(&PickRepository::new(pool), &mut ledger, &plan).await?;

    tracing::info!(
        %player_id,
        created = report.created,
        updated = report.updated,
        skipped_frozen = plan.skipped_frozen,
        "Picks saved"
    );

    Ok(SubmitPicksResponse {
        created: report.created,
        updated: report.updated,
        skipped_incomplete: plan.skipped_incomplete,
        skipped_frozen: plan.skipped_frozen,
    })
}

/// Keys the submission by event, rejecting unknown and repeated events.
fn desired_picks(
    submissions: &[PickSubmission],
    statuses: &HashMap<Uuid, EventStatus>,
) -> ApiResult<BTreeMap<Uuid, PodiumPick>> {
    let mut desired = BTreeMap::new();

    for submission in submissions {
        if !statuses.contains_key(&submission.event_id) {
            return Err(WebError::BadRequest(format!(
                "Unknown event {}",
                submission.event_id
            )));
        }

        if desired
            .insert(submission.event_id, submission.podium())
            .is_some()
        {
            return Err(WebError::BadRequest(format!(
                "Event {} is picked more than once",
                submission.event_id
            )));
        }
    }

    Ok(desired)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(event_id: Uuid) -> PickSubmission {
        PickSubmission {
            event_id,
            gold: Some(Uuid::new_v4()),
            silver: Some(Uuid::new_v4()),
            bronze: None,
        }
    }

    #[test]
    fn test_desired_picks_keyed_by_event() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let statuses = HashMap::from([(first, EventStatus::Upcoming), (second, EventStatus::Final)]);

        let desired = desired_picks(&[submission(first), submission(second)], &statuses)
            .expect("valid submission");

        assert_eq!(desired.len(), 2);
        assert!(desired[&first].bronze.is_none());
    }

    #[test]
    fn test_unknown_event_rejected() {
        let statuses = HashMap::from([(Uuid::new_v4(), EventStatus::Upcoming)]);

        let result = desired_picks(&[submission(Uuid::new_v4())], &statuses);

        assert!(matches!(result, Err(WebError::BadRequest(_))));
    }

    #[test]
    fn test_repeated_event_rejected() {
        let event_id = Uuid::new_v4();
        let statuses = HashMap::from([(event_id, EventStatus::Live)]);

        let result = desired_picks(&[submission(event_id), submission(event_id)], &statuses);

        assert!(matches!(result, Err(WebError::BadRequest(msg)) if msg.contains("more than once")));
    }
}
