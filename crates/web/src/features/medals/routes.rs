use axum::{Router, routing::get};

use super::handlers::{
    get_athlete_medal_events, get_country_medal_events, list_athlete_medals, list_country_medals,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_country_medals))
        .route("/countries/:id/events", get(get_country_medal_events))
        .route("/athletes", get(list_athlete_medals))
        .route("/athletes/:id/events", get(get_athlete_medal_events))
}
