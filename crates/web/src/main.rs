use anyhow::Context;
use podium_storage::Database;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{events, leaderboard, medals, picks};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        medals::handlers::list_country_medals,
        medals::handlers::get_country_medal_events,
        medals::handlers::list_athlete_medals,
        medals::handlers::get_athlete_medal_events,
        leaderboard::handlers::get_leaderboard,
        events::handlers::list_events,
        events::handlers::get_event_board,
        events::handlers::list_events_by_discipline,
        picks::handlers::list_player_picks,
        picks::handlers::submit_player_picks,
    ),
    components(
        schemas(
            podium_storage::dto::medals::CountryMedalEntry,
            podium_storage::dto::medals::AthleteMedalEntry,
            podium_storage::dto::medals::MedalDetailResponse,
            podium_storage::dto::leaderboard::LeaderboardEntry,
            podium_storage::dto::events::EventSummary,
            podium_storage::dto::events::EventBoard,
            podium_storage::dto::events::DayGroup,
            podium_storage::dto::events::DisciplineGroup,
            podium_storage::dto::picks::PickSubmission,
            podium_storage::dto::picks::SubmitPicksRequest,
            podium_storage::dto::picks::SubmitPicksResponse,
            podium_storage::dto::picks::PlayerPickEntry,
            podium_storage::dto::picks::PlayerPicksResponse,
            podium_storage::services::medals::MedalEvent,
            podium_storage::services::status::EventStatus,
            podium_storage::models::Podium,
        )
    ),
    tags(
        (name = "medals", description = "Medal tables and medal drill-downs"),
        (name = "leaderboard", description = "Prediction game standings"),
        (name = "events", description = "Event schedule and status"),
        (name = "picks", description = "Player podium picks"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Podium API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        current_season = config.current_season,
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    let state = AppState::new(db, config.current_season);
    let app = routes::build_router(state, api_keys);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
