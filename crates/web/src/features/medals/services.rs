use podium_storage::{
    dto::medals::{
        AthleteMedalEntry, CountryMedalEntry, MedalDetailResponse, athlete_table, country_table,
    },
    error::{Result, StorageError},
    repository::{athlete::AthleteRepository, country::CountryRepository, event::EventRepository},
    services::medals::{
        MedalHolder, TeamCreditPolicy, aggregate, aggregate_competitors, competitor_lookup,
        detail_for, entity_lookup,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

/// Country medal table for a season
pub async fn country_medal_table(
    pool: &PgPool,
    season: i32,
    limit: usize,
) -> Result<Vec<CountryMedalEntry>> {
    let outcomes = EventRepository::new(pool).list(Some(season)).await?;
    let countries = CountryRepository::new(pool).list().await?;

    let ranked = aggregate(&outcomes, &entity_lookup(&countries), Some(season));
    Ok(country_table(ranked, limit))
}

/// Athlete medal table for a season, every member of a team credited
pub async fn athlete_medal_table(
    pool: &PgPool,
    season: i32,
    limit: usize,
) -> Result<Vec<AthleteMedalEntry>> {
    let outcomes = EventRepository::new(pool).list(Some(season)).await?;
    let athletes = AthleteRepository::new(pool).list().await?;
    let countries = CountryRepository::new(pool).list().await?;

    let ranked = aggregate_competitors(
        &outcomes,
        &competitor_lookup(&athletes),
        &entity_lookup(&countries),
        Some(season),
        TeamCreditPolicy::default(),
    );
    Ok(athlete_table(ranked, limit))
}

/// Events behind a country's tally
pub async fn country_medal_events(
    pool: &PgPool,
    country_id: Uuid,
    season: i32,
) -> Result<MedalDetailResponse> {
    let countries = CountryRepository::new(pool).list().await?;
    if !countries.iter().any(|c| c.country_id == country_id) {
        return Err(StorageError::NotFound);
    }

    medal_events(pool, MedalHolder::Country(country_id), country_id, season).await
}

/// Events behind an athlete's tally
pub async fn athlete_medal_events(
    pool: &PgPool,
    athlete_id: Uuid,
    season: i32,
) -> Result<MedalDetailResponse> {
    let athletes = AthleteRepository::new(pool).list().await?;
    if !athletes.iter().any(|a| a.athlete_id == athlete_id) {
        return Err(StorageError::NotFound);
    }

    medal_events(pool, MedalHolder::Athlete(athlete_id), athlete_id, season).await
}

async fn medal_events(
    pool: &PgPool,
    holder: MedalHolder,
    holder_id: Uuid,
    season: i32,
) -> Result<MedalDetailResponse> {
    let outcomes = EventRepository::new(pool).list(Some(season)).await?;

    Ok(MedalDetailResponse {
        holder_id,
        season,
        events: detail_for(&outcomes, holder, Some(season), TeamCreditPolicy::default()),
    })
}
