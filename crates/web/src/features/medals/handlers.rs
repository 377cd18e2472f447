use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use podium_storage::dto::medals::{
    AthleteMedalEntry, CountryMedalEntry, MedalDetailResponse, MedalTableFilter, SeasonFilter,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/medals/countries",
    params(MedalTableFilter),
    responses(
        (status = 200, description = "Country medal table", body = Vec<CountryMedalEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "medals"
)]
pub async fn list_country_medals(
    State(state): State<AppState>,
    Query(filter): Query<MedalTableFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let season = state.season_or_current(filter.season);
    let table = services::country_medal_table(state.db.pool(), season, filter.limit()).await?;

    Ok(Json(table).into_response())
}

#[utoipa::path(
    get,
    path = "/api/medals/countries/{id}/events",
    params(
        ("id" = Uuid, Path, description = "Country ID"),
        SeasonFilter
    ),
    responses(
        (status = 200, description = "Medal events of the country", body = MedalDetailResponse),
        (status = 404, description = "Country not found")
    ),
    tag = "medals"
)]
pub async fn get_country_medal_events(
    State(state): State<AppState>,
    Path(country_id): Path<Uuid>,
    Query(filter): Query<SeasonFilter>,
) -> Result<Response, WebError> {
    let season = state.season_or_current(filter.season);
    let detail = services::country_medal_events(state.db.pool(), country_id, season).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    get,
    path = "/api/medals/athletes",
    params(MedalTableFilter),
    responses(
        (status = 200, description = "Athlete medal table", body = Vec<AthleteMedalEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "medals"
)]
pub async fn list_athlete_medals(
    State(state): State<AppState>,
    Query(filter): Query<MedalTableFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let season = state.season_or_current(filter.season);
    let table = services::athlete_medal_table(state.db.pool(), season, filter.limit()).await?;

    Ok(Json(table).into_response())
}

#[utoipa::path(
    get,
    path = "/api/medals/athletes/{id}/events",
    params(
        ("id" = Uuid, Path, description = "Athlete ID"),
        SeasonFilter
    ),
    responses(
        (status = 200, description = "Medal events of the athlete", body = MedalDetailResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "medals"
)]
pub async fn get_athlete_medal_events(
    State(state): State<AppState>,
    Path(athlete_id): Path<Uuid>,
    Query(filter): Query<SeasonFilter>,
) -> Result<Response, WebError> {
    let season = state.season_or_current(filter.season);
    let detail = services::athlete_medal_events(state.db.pool(), athlete_id, season).await?;

    Ok(Json(detail).into_response())
}
