use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{list_player_picks, submit_player_picks};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id/picks", post(submit_player_picks))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:id/picks", get(list_player_picks))
        .merge(protected)
}
