use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{OutcomeRecord, Podium, PodiumSlot};

#[derive(FromRow)]
struct EventRow {
    event_id: Uuid,
    name: String,
    scheduled_at: Option<DateTime<Utc>>,
    season: i32,
    discipline: Option<String>,
    venue: Option<String>,
    gold_country_id: Option<Uuid>,
    silver_country_id: Option<Uuid>,
    bronze_country_id: Option<Uuid>,
}

#[derive(FromRow)]
struct PodiumAthleteRow {
    event_id: Uuid,
    medal_rank: i16,
    athlete_id: Uuid,
}

/// Repository for Event database operations
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List events with their podium, soonest first, optionally for one season
    pub async fn list(&self, season: Option<i32>) -> Result<Vec<OutcomeRecord>> {
        let events = self.fetch_events(season).await?;
        let mut athletes = self.fetch_podium_athletes(season).await?;

        let records = events
            .into_iter()
            .map(|row| {
                let mut record = OutcomeRecord {
                    event_id: row.event_id,
                    name: row.name,
                    scheduled_at: row.scheduled_at,
                    season: row.season,
                    discipline: row.discipline,
                    venue: row.venue,
                    slots: [
                        PodiumSlot::from_country(row.gold_country_id),
                        PodiumSlot::from_country(row.silver_country_id),
                        PodiumSlot::from_country(row.bronze_country_id),
                    ],
                };

                for (medal, athlete_ids) in athletes.remove(&row.event_id).unwrap_or_default() {
                    record.slot_mut(medal).athlete_ids = athlete_ids;
                }

                record
            })
            .collect();

        Ok(records)
    }

    async fn fetch_events(&self, season: Option<i32>) -> Result<Vec<EventRow>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT event_id, name, scheduled_at, season, discipline, venue,
                   gold_country_id, silver_country_id, bronze_country_id
            FROM events
            WHERE 1=1
            "#,
        );

        if let Some(season) = season {
            query.push(" AND season = ");
            query.push_bind(season);
        }

        query.push(" ORDER BY scheduled_at ASC NULLS LAST, name ASC");

        let rows: Vec<EventRow> = query.build_query_as().fetch_all(self.pool).await?;
        Ok(rows)
    }

    async fn fetch_podium_athletes(
        &self,
        season: Option<i32>,
    ) -> Result<HashMap<Uuid, Vec<(Podium, Vec<Uuid>)>>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT epa.event_id, epa.medal_rank, epa.athlete_id
            FROM event_podium_athletes epa
            INNER JOIN events e ON e.event_id = epa.event_id
            WHERE 1=1
            "#,
        );

        if let Some(season) = season {
            query.push(" AND e.season = ");
            query.push_bind(season);
        }

        query.push(" ORDER BY epa.event_id, epa.medal_rank, epa.listing_order");

        let rows: Vec<PodiumAthleteRow> = query.build_query_as().fetch_all(self.pool).await?;

        let mut by_event: HashMap<Uuid, Vec<(Podium, Vec<Uuid>)>> = HashMap::new();
        for row in rows {
            let Some(medal) = Podium::from_rank(row.medal_rank) else {
                warn!(
                    event_id = %row.event_id,
                    medal_rank = row.medal_rank,
                    "Ignoring podium athlete with invalid rank"
                );
                continue;
            };

            let slots = by_event.entry(row.event_id).or_default();
            match slots.last_mut() {
                Some((last, athlete_ids)) if *last == medal => athlete_ids.push(row.athlete_id),
                _ => slots.push((medal, vec![row.athlete_id])),
            }
        }

        Ok(by_event)
    }
}
