use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::OutcomeRecord;

/// Lifecycle state of a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EventStatus {
    Upcoming,
    Live,
    Final,
}

impl EventStatus {
    /// Picks on a frozen event can no longer be created or edited.
    pub fn is_frozen(self) -> bool {
        matches!(self, Self::Final)
    }
}

/// Time windows around an event's scheduled start.
///
/// An event is `Live` from `lead_in` before its start until `close_after`
/// past it. Past that, an event with no recorded result is assumed closed
/// and reported as `Final` even though nobody entered the podium yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWindows {
    pub lead_in: TimeDelta,
    pub close_after: TimeDelta,
}

impl Default for StatusWindows {
    fn default() -> Self {
        Self {
            lead_in: TimeDelta::minutes(30),
            close_after: TimeDelta::hours(4),
        }
    }
}

impl StatusWindows {
    pub fn resolve(
        &self,
        scheduled_at: Option<DateTime<Utc>>,
        has_recorded_outcome: bool,
        now: DateTime<Utc>,
    ) -> EventStatus {
        if has_recorded_outcome {
            return EventStatus::Final;
        }

        let Some(scheduled_at) = scheduled_at else {
            return EventStatus::Upcoming;
        };

        let elapsed = now - scheduled_at;
        if elapsed > self.close_after {
            EventStatus::Final
        } else if elapsed >= -self.lead_in {
            EventStatus::Live
        } else {
            EventStatus::Upcoming
        }
    }

    pub fn resolve_event(&self, event: &OutcomeRecord, now: DateTime<Utc>) -> EventStatus {
        self.resolve(event.scheduled_at, event.has_recorded_outcome(), now)
    }
}

/// Resolves a status with the default windows.
pub fn resolve(
    scheduled_at: Option<DateTime<Utc>>,
    has_recorded_outcome: bool,
    now: DateTime<Utc>,
) -> EventStatus {
    StatusWindows::default().resolve(scheduled_at, has_recorded_outcome, now)
}

/// Status of every event, all resolved against the same `now`.
pub fn resolve_all(
    events: &[OutcomeRecord],
    windows: &StatusWindows,
    now: DateTime<Utc>,
) -> HashMap<Uuid, EventStatus> {
    events
        .iter()
        .map(|event| (event.event_id, windows.resolve_event(event, now)))
        .collect()
}
