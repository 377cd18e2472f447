use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use podium_storage::dto::picks::{PlayerPicksResponse, SubmitPicksRequest, SubmitPicksResponse};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/players/{id}/picks",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    responses(
        (status = 200, description = "Picks of the player", body = PlayerPicksResponse),
        (status = 404, description = "Player not found")
    ),
    tag = "picks"
)]
pub async fn list_player_picks(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let picks = services::list_player_picks(state.db.pool(), player_id, Utc::now()).await?;

    Ok(Json(picks).into_response())
}

#[utoipa::path(
    post,
    path = "/api/players/{id}/picks",
    params(
        ("id" = Uuid, Path, description = "Player ID")
    ),
    request_body = SubmitPicksRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Picks saved", body = SubmitPicksResponse),
        (status = 400, description = "Validation error or unknown event"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Player may not save picks"),
        (status = 404, description = "Player not found"),
        (status = 409, description = "A submission for this player is already running"),
        (status = 502, description = "Picks were only partially saved")
    ),
    tag = "picks"
)]
pub async fn submit_player_picks(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
    Json(req): Json<SubmitPicksRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let _permit = state
        .submissions
        .try_acquire(player_id)
        .ok_or(WebError::SubmissionInFlight)?;

    let response = services::submit_picks(state.db.pool(), player_id, &req, Utc::now()).await?;

    Ok(Json(response).into_response())
}
