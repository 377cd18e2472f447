use chrono::{DateTime, Utc};
use podium_storage::{
    dto::events::{DisciplineGroup, EventBoard, EventSummary},
    error::Result,
    repository::event::EventRepository,
    services::{
        schedule::{self, BoardLimits},
        status::StatusWindows,
    },
};
use sqlx::PgPool;

/// A season's events with their current status
pub async fn list_events(
    pool: &PgPool,
    season: i32,
    now: DateTime<Utc>,
) -> Result<Vec<EventSummary>> {
    let events = EventRepository::new(pool).list(Some(season)).await?;
    Ok(schedule::annotate(&events, &StatusWindows::default(), now))
}

pub async fn event_board(pool: &PgPool, season: i32, now: DateTime<Utc>) -> Result<EventBoard> {
    let events = EventRepository::new(pool).list(Some(season)).await?;
    Ok(schedule::board(
        &events,
        now,
        &StatusWindows::default(),
        BoardLimits::default(),
    ))
}

pub async fn events_by_discipline(
    pool: &PgPool,
    season: i32,
    now: DateTime<Utc>,
) -> Result<Vec<DisciplineGroup>> {
    let events = EventRepository::new(pool).list(Some(season)).await?;
    Ok(schedule::by_discipline(&events, &StatusWindows::default(), now))
}
