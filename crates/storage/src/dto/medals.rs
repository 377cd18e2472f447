use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::services::medals::{AggregatedCompetitor, AggregatedEntity, MedalEvent};
use crate::services::ranking::positioned;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 500;

pub(crate) fn validate_limit(limit: Option<usize>) -> Result<(), String> {
    match limit {
        Some(limit) if limit < 1 || limit > MAX_LIMIT => {
            Err(format!("limit must be between 1 and {MAX_LIMIT}"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MedalTableFilter {
    /// Edition year, the current season when omitted
    pub season: Option<i32>,
    /// Number of rows to return, 10 when omitted
    pub limit: Option<usize>,
}

impl MedalTableFilter {
    pub fn validate(&self) -> Result<(), String> {
        validate_limit(self.limit)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SeasonFilter {
    /// Edition year, the current season when omitted
    pub season: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountryMedalEntry {
    pub rank: i64,
    pub country_id: Uuid,
    pub name: String,
    pub noc: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AthleteMedalEntry {
    pub rank: i64,
    pub athlete_id: Uuid,
    pub name: String,
    pub noc: Option<String>,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MedalDetailResponse {
    pub holder_id: Uuid,
    pub season: i32,
    pub events: Vec<MedalEvent>,
}

pub fn country_table(entities: Vec<AggregatedEntity>, limit: usize) -> Vec<CountryMedalEntry> {
    positioned(entities)
        .take(limit)
        .map(|(rank, entity)| CountryMedalEntry {
            rank,
            country_id: entity.entity_id,
            name: entity.name,
            noc: entity.code,
            gold: entity.tally.gold,
            silver: entity.tally.silver,
            bronze: entity.tally.bronze,
            total: entity.tally.total,
        })
        .collect()
}

pub fn athlete_table(competitors: Vec<AggregatedCompetitor>, limit: usize) -> Vec<AthleteMedalEntry> {
    positioned(competitors)
        .take(limit)
        .map(|(rank, competitor)| AthleteMedalEntry {
            rank,
            athlete_id: competitor.athlete_id,
            name: competitor.name,
            noc: competitor.code,
            gold: competitor.tally.gold,
            silver: competitor.tally.silver,
            bronze: competitor.tally.bronze,
            total: competitor.tally.total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_validation() {
        assert!(validate_limit(None).is_ok());
        assert!(validate_limit(Some(1)).is_ok());
        assert!(validate_limit(Some(MAX_LIMIT)).is_ok());
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(MAX_LIMIT + 1)).is_err());
    }
}
