use axum::{Router, routing::get};

use super::handlers::{get_event_board, list_events, list_events_by_discipline};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/board", get(get_event_board))
        .route("/disciplines", get(list_events_by_discipline))
}
