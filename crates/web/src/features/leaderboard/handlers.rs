use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use podium_storage::{
    Database,
    dto::leaderboard::{LeaderboardEntry, LeaderboardFilter},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardFilter),
    responses(
        (status = 200, description = "Leaderboard retrieved successfully", body = Vec<LeaderboardEntry>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    Query(filter): Query<LeaderboardFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let entries = services::get_leaderboard(db.pool(), &filter).await?;

    Ok(Json(entries).into_response())
}
