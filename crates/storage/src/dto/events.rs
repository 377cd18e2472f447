use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{OutcomeRecord, Podium};
use crate::services::status::EventStatus;

/// An event annotated with its status at the time of the request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventSummary {
    pub event_id: Uuid,
    pub name: String,
    pub season: i32,
    pub discipline: Option<String>,
    pub venue: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub gold_country_id: Option<Uuid>,
    pub silver_country_id: Option<Uuid>,
    pub bronze_country_id: Option<Uuid>,
}

impl EventSummary {
    pub fn new(event: &OutcomeRecord, status: EventStatus) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name.clone(),
            season: event.season,
            discipline: event.discipline.clone(),
            venue: event.venue.clone(),
            scheduled_at: event.scheduled_at,
            status,
            gold_country_id: event.slot(Podium::Gold).country_id,
            silver_country_id: event.slot(Podium::Silver).country_id,
            bronze_country_id: event.slot(Podium::Bronze).country_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayGroup {
    pub day: NaiveDate,
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventBoard {
    /// Decided events, most recent first
    pub recent_results: Vec<EventSummary>,
    pub live: Vec<EventSummary>,
    /// Next events to start, grouped by calendar day (UTC)
    pub upcoming: Vec<DayGroup>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DisciplineGroup {
    pub discipline: String,
    pub events: Vec<EventSummary>,
}
