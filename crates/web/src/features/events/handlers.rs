use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use podium_storage::dto::{
    events::{DisciplineGroup, EventBoard, EventSummary},
    medals::SeasonFilter,
};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    params(SeasonFilter),
    responses(
        (status = 200, description = "Events of the season with their status", body = Vec<EventSummary>)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<SeasonFilter>,
) -> Result<Response, WebError> {
    let season = state.season_or_current(filter.season);
    let events = services::list_events(state.db.pool(), season, Utc::now()).await?;

    Ok(Json(events).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/board",
    params(SeasonFilter),
    responses(
        (status = 200, description = "Recent results, live and upcoming events", body = EventBoard)
    ),
    tag = "events"
)]
pub async fn get_event_board(
    State(state): State<AppState>,
    Query(filter): Query<SeasonFilter>,
) -> Result<Response, WebError> {
    let season = state.season_or_current(filter.season);
    let board = services::event_board(state.db.pool(), season, Utc::now()).await?;

    Ok(Json(board).into_response())
}

#[utoipa::path(
    get,
    path = "/api/events/disciplines",
    params(SeasonFilter),
    responses(
        (status = 200, description = "Events grouped by discipline", body = Vec<DisciplineGroup>)
    ),
    tag = "events"
)]
pub async fn list_events_by_discipline(
    State(state): State<AppState>,
    Query(filter): Query<SeasonFilter>,
) -> Result<Response, WebError> {
    let season = state.season_or_current(filter.season);
    let groups = services::events_by_discipline(state.db.pool(), season, Utc::now()).await?;

    Ok(Json(groups).into_response())
}
