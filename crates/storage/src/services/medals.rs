use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Athlete, Country, OutcomeRecord, Podium};
use crate::services::ranking;

/// Gold/silver/bronze counts for one medal holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MedalTally {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

impl MedalTally {
    pub fn award(&mut self, medal: Podium) {
        match medal {
            Podium::Gold => self.gold += 1,
            Podium::Silver => self.silver += 1,
            Podium::Bronze => self.bronze += 1,
        }
        self.total += 1;
    }

    /// Gold first, then silver, then bronze, then total
    pub fn ranking_key(&self) -> (u32, u32, u32, u32) {
        (self.gold, self.silver, self.bronze, self.total)
    }
}

/// Display data for a country, keyed by country id in lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub name: String,
    pub code: String,
}

impl EntitySummary {
    fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            code: String::new(),
        }
    }
}

/// Display data for a competitor, keyed by athlete id in lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitorSummary {
    pub name: String,
    pub code: Option<String>,
}

pub fn entity_lookup(countries: &[Country]) -> HashMap<Uuid, EntitySummary> {
    countries
        .iter()
        .map(|country| {
            (
                country.country_id,
                EntitySummary {
                    name: country.name.clone(),
                    code: country.noc.clone(),
                },
            )
        })
        .collect()
}

pub fn competitor_lookup(athletes: &[Athlete]) -> HashMap<Uuid, CompetitorSummary> {
    athletes
        .iter()
        .map(|athlete| {
            (
                athlete.athlete_id,
                CompetitorSummary {
                    name: athlete.name.clone(),
                    code: athlete.noc.clone().filter(|noc| !noc.is_empty()),
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedEntity {
    pub entity_id: Uuid,
    pub name: String,
    pub code: String,
    pub tally: MedalTally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedCompetitor {
    pub athlete_id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub tally: MedalTally,
}

/// Which of the competitors listed on a slot receive the medal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamCreditPolicy {
    /// Every listed competitor is credited with the medal
    #[default]
    CreditAll,
    /// Only the first listed competitor is credited
    CreditFirstOnly,
}

impl TeamCreditPolicy {
    pub fn credited<'a>(&self, athlete_ids: &'a [Uuid]) -> &'a [Uuid] {
        match self {
            Self::CreditAll => athlete_ids,
            Self::CreditFirstOnly => &athlete_ids[..athlete_ids.len().min(1)],
        }
    }
}

/// Tallies keyed by holder, remembering first-seen order for stable ties.
#[derive(Default)]
struct TallyBook {
    order: Vec<Uuid>,
    tallies: HashMap<Uuid, MedalTally>,
}

impl TallyBook {
    fn award(&mut self, holder: Uuid, medal: Podium) {
        let tally = self.tallies.entry(holder).or_insert_with(|| {
            self.order.push(holder);
            MedalTally::default()
        });
        tally.award(medal);
    }

    fn into_ranked(mut self) -> Vec<(Uuid, MedalTally)> {
        let tallies: Vec<(Uuid, MedalTally)> = self
            .order
            .into_iter()
            .filter_map(|holder| self.tallies.remove(&holder).map(|tally| (holder, tally)))
            .filter(|(_, tally)| tally.total > 0)
            .collect();

        ranking::rank(tallies, |(_, tally)| tally.ranking_key())
    }
}

/// Medal table by country for one season (or all seasons when `season` is `None`).
///
/// Undecided slots contribute nothing. Countries missing from `lookup` are
/// still counted, under a placeholder name.
pub fn aggregate(
    outcomes: &[OutcomeRecord],
    lookup: &HashMap<Uuid, EntitySummary>,
    season: Option<i32>,
) -> Vec<AggregatedEntity> {
    let mut book = TallyBook::default();

    for outcome in outcomes.iter().filter(|o| o.in_season(season)) {
        for (medal, slot) in outcome.podium() {
            if let Some(country_id) = slot.country_id {
                book.award(country_id, medal);
            }
        }
    }

    book.into_ranked()
        .into_iter()
        .map(|(entity_id, tally)| {
            let summary = lookup
                .get(&entity_id)
                .cloned()
                .unwrap_or_else(EntitySummary::unknown);
            AggregatedEntity {
                entity_id,
                name: summary.name,
                code: summary.code,
                tally,
            }
        })
        .collect()
}

/// Medal table by individual competitor.
///
/// Which competitors of a team slot get credit is decided by `policy`. A
/// competitor without a country code of their own takes the code of the
/// country on the first slot they were credited for.
pub fn aggregate_competitors(
    outcomes: &[OutcomeRecord],
    competitors: &HashMap<Uuid, CompetitorSummary>,
    entities: &HashMap<Uuid, EntitySummary>,
    season: Option<i32>,
    policy: TeamCreditPolicy,
) -> Vec<AggregatedCompetitor> {
    let mut book = TallyBook::default();
    let mut slot_country: HashMap<Uuid, Uuid> = HashMap::new();

    for outcome in outcomes.iter().filter(|o| o.in_season(season)) {
        for (medal, slot) in outcome.podium().filter(|(_, slot)| slot.is_decided()) {
            for &athlete_id in policy.credited(&slot.athlete_ids) {
                book.award(athlete_id, medal);
                if let Some(country_id) = slot.country_id {
                    slot_country.entry(athlete_id).or_insert(country_id);
                }
            }
        }
    }

    book.into_ranked()
        .into_iter()
        .map(|(athlete_id, tally)| {
            let summary = competitors.get(&athlete_id);
            let fallback_code = || {
                slot_country
                    .get(&athlete_id)
                    .and_then(|country_id| entities.get(country_id))
                    .map(|entity| entity.code.clone())
            };

            AggregatedCompetitor {
                athlete_id,
                name: summary
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                code: summary.and_then(|s| s.code.clone()).or_else(fallback_code),
                tally,
            }
        })
        .collect()
}

/// Whose medals a drill-down is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedalHolder {
    Country(Uuid),
    Athlete(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MedalEvent {
    pub event_id: Uuid,
    pub event_name: String,
    pub medal: Podium,
}

/// The individual results behind one holder's tally: all golds, then all
/// silvers, then all bronzes, each group in input order.
///
/// Only computed for the holder being expanded, rather than for every row of
/// a medal table. `policy` must match the one the athlete table was built
/// with; it has no effect on country drill-downs.
pub fn detail_for(
    outcomes: &[OutcomeRecord],
    holder: MedalHolder,
    season: Option<i32>,
    policy: TeamCreditPolicy,
) -> Vec<MedalEvent> {
    let mut events = Vec::new();

    for medal in Podium::ALL {
        for outcome in outcomes.iter().filter(|o| o.in_season(season)) {
            let slot = outcome.slot(medal);
            if !slot.is_decided() {
                continue;
            }

            let holds = match holder {
                MedalHolder::Country(country_id) => slot.country_id == Some(country_id),
                MedalHolder::Athlete(athlete_id) => {
                    policy.credited(&slot.athlete_ids).contains(&athlete_id)
                }
            };

            if holds {
                events.push(MedalEvent {
                    event_id: outcome.event_id,
                    event_name: outcome.name.clone(),
                    medal,
                });
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PodiumSlot;

    struct Fixture {
        nor: Uuid,
        ita: Uuid,
        ger: Uuid,
        lookup: HashMap<Uuid, EntitySummary>,
    }

    impl Fixture {
        fn new() -> Self {
            let nor = Uuid::new_v4();
            let ita = Uuid::new_v4();
            let ger = Uuid::new_v4();
            let lookup = [(nor, "Norway", "NOR"), (ita, "Italy", "ITA"), (ger, "Germany", "GER")]
                .into_iter()
                .map(|(id, name, code)| {
                    (
                        id,
                        EntitySummary {
                            name: name.to_string(),
                            code: code.to_string(),
                        },
                    )
                })
                .collect();
            Self { nor, ita, ger, lookup }
        }
    }

    fn slot(country_id: Option<Uuid>, athlete_ids: &[Uuid]) -> PodiumSlot {
        PodiumSlot {
            country_id,
            athlete_ids: athlete_ids.to_vec(),
        }
    }

    fn outcome(name: &str, season: i32, podium: [Option<Uuid>; 3]) -> OutcomeRecord {
        OutcomeRecord {
            event_id: Uuid::new_v4(),
            name: name.to_string(),
            scheduled_at: None,
            season,
            discipline: None,
            venue: None,
            slots: podium.map(|country_id| slot(country_id, &[])),
        }
    }

    #[test]
    fn test_gold_count_leads_the_table() {
        let f = Fixture::new();
        let outcomes = vec![
            outcome("Sprint", 2026, [Some(f.nor), None, None]),
            outcome("Slalom", 2026, [Some(f.ita), None, None]),
            outcome("Relay", 2026, [Some(f.nor), None, None]),
        ];

        let table = aggregate(&outcomes, &f.lookup, Some(2026));

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].code, "NOR");
        assert_eq!(table[0].tally.gold, 2);
        assert_eq!(table[1].code, "ITA");
        assert_eq!(table[1].tally.gold, 1);
    }

    #[test]
    fn test_tie_break_order() {
        let f = Fixture::new();
        let outcomes = vec![
            outcome("A", 2026, [Some(f.nor), Some(f.ita), Some(f.nor)]),
            outcome("B", 2026, [Some(f.ita), Some(f.ger), Some(f.nor)]),
            outcome("C", 2026, [Some(f.ger), None, Some(f.ger)]),
        ];

        let table = aggregate(&outcomes, &f.lookup, None);
        let codes: Vec<&str> = table.iter().map(|e| e.code.as_str()).collect();

        // one gold each; NOR has the most medals but no silver
        assert_eq!(codes, vec!["GER", "ITA", "NOR"]);
        assert_eq!(table[2].tally.total, 3);
        assert_eq!(table[0].tally, MedalTally { gold: 1, silver: 1, bronze: 1, total: 3 });
    }

    #[test]
    fn test_identical_tallies_keep_first_seen_order() {
        let f = Fixture::new();
        let outcomes = vec![
            outcome("A", 2026, [Some(f.ita), Some(f.ger), None]),
            outcome("B", 2026, [Some(f.ger), Some(f.ita), None]),
        ];

        for _ in 0..5 {
            let table = aggregate(&outcomes, &f.lookup, None);
            let codes: Vec<&str> = table.iter().map(|e| e.code.as_str()).collect();
            assert_eq!(codes, vec!["ITA", "GER"]);
        }
    }

    #[test]
    fn test_total_equals_decided_slots() {
        let f = Fixture::new();
        let outcomes = vec![
            outcome("A", 2026, [Some(f.nor), Some(f.ita), None]),
            outcome("B", 2026, [None, None, None]),
            outcome("C", 2026, [Some(f.ger), Some(f.ger), Some(Uuid::new_v4())]),
            outcome("D", 2022, [Some(f.nor), Some(f.nor), Some(f.nor)]),
        ];

        let decided: u32 = outcomes
            .iter()
            .filter(|o| o.season == 2026)
            .flat_map(|o| o.slots.iter())
            .filter(|s| s.is_decided())
            .count() as u32;
        let table = aggregate(&outcomes, &f.lookup, Some(2026));
        let total: u32 = table.iter().map(|e| e.tally.total).sum();

        assert_eq!(total, decided);
        assert!(table.iter().any(|e| e.name == "Unknown"));
    }

    #[test]
    fn test_other_season_excluded() {
        let f = Fixture::new();
        let outcomes = vec![
            outcome("A", 2022, [Some(f.ger), None, None]),
            outcome("B", 2026, [Some(f.nor), None, None]),
        ];

        let table = aggregate(&outcomes, &f.lookup, Some(2026));
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].entity_id, f.nor);
    }

    #[test]
    fn test_empty_input_gives_empty_table() {
        let f = Fixture::new();
        assert!(aggregate(&[], &f.lookup, None).is_empty());
    }

    #[test]
    fn test_team_slot_credits_every_competitor() {
        let f = Fixture::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut relay = outcome("Relay", 2026, [Some(f.nor), Some(f.ita), None]);
        relay.slot_mut(Podium::Gold).athlete_ids = vec![a, b];
        relay.slot_mut(Podium::Silver).athlete_ids = vec![c];
        let mut sprint = outcome("Sprint", 2026, [Some(f.nor), None, None]);
        sprint.slot_mut(Podium::Gold).athlete_ids = vec![b];

        let competitors = HashMap::from([(
            b,
            CompetitorSummary {
                name: "Bo".to_string(),
                code: Some("SWE".to_string()),
            },
        )]);

        let table = aggregate_competitors(
            &[relay.clone(), sprint.clone()],
            &competitors,
            &f.lookup,
            Some(2026),
            TeamCreditPolicy::CreditAll,
        );

        let rows: Vec<(Uuid, u32, Option<&str>)> = table
            .iter()
            .map(|c| (c.athlete_id, c.tally.total, c.code.as_deref()))
            .collect();
        assert_eq!(
            rows,
            vec![(b, 2, Some("SWE")), (a, 1, Some("NOR")), (c, 1, Some("ITA"))]
        );

        let first_only = aggregate_competitors(
            &[relay, sprint],
            &competitors,
            &f.lookup,
            Some(2026),
            TeamCreditPolicy::CreditFirstOnly,
        );
        let ids: Vec<Uuid> = first_only.iter().map(|c| c.athlete_id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_detail_grouped_by_medal() {
        let f = Fixture::new();
        let outcomes = vec![
            outcome("Downhill", 2026, [Some(f.ita), Some(f.nor), None]),
            outcome("Super-G", 2026, [Some(f.nor), None, Some(f.nor)]),
            outcome("Giant Slalom", 2026, [None, Some(f.nor), None]),
            outcome("Old Slalom", 2022, [Some(f.nor), None, None]),
        ];

        let detail = detail_for(
            &outcomes,
            MedalHolder::Country(f.nor),
            Some(2026),
            TeamCreditPolicy::default(),
        );
        let rows: Vec<(&str, Podium)> = detail
            .iter()
            .map(|e| (e.event_name.as_str(), e.medal))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("Super-G", Podium::Gold),
                ("Downhill", Podium::Silver),
                ("Giant Slalom", Podium::Silver),
                ("Super-G", Podium::Bronze),
            ]
        );
    }

    #[test]
    fn test_detail_for_athlete() {
        let f = Fixture::new();
        let athlete = Uuid::new_v4();
        let mut relay = outcome("Relay", 2026, [Some(f.ger), None, None]);
        relay.slot_mut(Podium::Gold).athlete_ids = vec![Uuid::new_v4(), athlete];

        let detail = detail_for(
            &[relay.clone()],
            MedalHolder::Athlete(athlete),
            None,
            TeamCreditPolicy::CreditAll,
        );
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].medal, Podium::Gold);
        assert!(
            detail_for(&[], MedalHolder::Athlete(athlete), None, TeamCreditPolicy::CreditAll)
                .is_empty()
        );

        // second listed, so not credited when only the first one counts
        let first_only = detail_for(
            &[relay],
            MedalHolder::Athlete(athlete),
            None,
            TeamCreditPolicy::CreditFirstOnly,
        );
        assert!(first_only.is_empty());
    }

    #[test]
    fn test_athlete_on_undecided_slot_not_credited() {
        let f = Fixture::new();
        let athlete = Uuid::new_v4();
        let mut pending = outcome("Pending", 2026, [None, Some(f.ita), None]);
        pending.slot_mut(Podium::Gold).athlete_ids = vec![athlete];

        let countries = aggregate(&[pending.clone()], &f.lookup, None);
        let athletes = aggregate_competitors(
            &[pending.clone()],
            &HashMap::new(),
            &f.lookup,
            None,
            TeamCreditPolicy::CreditAll,
        );
        let detail = detail_for(
            &[pending],
            MedalHolder::Athlete(athlete),
            None,
            TeamCreditPolicy::CreditAll,
        );

        assert_eq!(countries.len(), 1);
        assert!(athletes.iter().all(|row| row.athlete_id != athlete));
        assert!(detail.is_empty());
    }
}
