use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A podium position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Podium {
    Gold,
    Silver,
    Bronze,
}

impl Podium {
    pub const ALL: [Podium; 3] = [Podium::Gold, Podium::Silver, Podium::Bronze];

    /// 1-based finishing position
    pub fn rank(self) -> u8 {
        match self {
            Self::Gold => 1,
            Self::Silver => 2,
            Self::Bronze => 3,
        }
    }

    pub fn from_rank(rank: i16) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }

    fn index(self) -> usize {
        usize::from(self.rank()) - 1
    }
}

/// One result slot of an event. A slot without a country is undecided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PodiumSlot {
    pub country_id: Option<Uuid>,
    /// Competitors credited for this slot, in listing order. Team events list several.
    pub athlete_ids: Vec<Uuid>,
}

impl PodiumSlot {
    pub fn from_country(country_id: Option<Uuid>) -> Self {
        Self {
            country_id,
            athlete_ids: Vec::new(),
        }
    }

    pub fn is_decided(&self) -> bool {
        self.country_id.is_some()
    }
}

/// A scheduled medal event and its (possibly partial) result.
///
/// Built by the event repository from the `events` row plus its linked
/// podium athletes; read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutcomeRecord {
    pub event_id: Uuid,
    pub name: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub season: i32,
    pub discipline: Option<String>,
    pub venue: Option<String>,
    #[schema(value_type = Vec<PodiumSlot>)]
    pub slots: [PodiumSlot; 3],
}

impl OutcomeRecord {
    pub fn slot(&self, medal: Podium) -> &PodiumSlot {
        &self.slots[medal.index()]
    }

    pub fn slot_mut(&mut self, medal: Podium) -> &mut PodiumSlot {
        &mut self.slots[medal.index()]
    }

    /// Slots paired with their position, gold first
    pub fn podium(&self) -> impl Iterator<Item = (Podium, &PodiumSlot)> {
        Podium::ALL.into_iter().zip(self.slots.iter())
    }

    /// The result counts as recorded once a gold medallist is linked.
    pub fn has_recorded_outcome(&self) -> bool {
        self.slot(Podium::Gold).is_decided()
    }

    pub fn in_season(&self, season: Option<i32>) -> bool {
        season.is_none_or(|season| self.season == season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(season: i32) -> OutcomeRecord {
        OutcomeRecord {
            event_id: Uuid::new_v4(),
            name: "Men's Downhill".to_string(),
            scheduled_at: None,
            season,
            discipline: Some("Alpine Skiing".to_string()),
            venue: None,
            slots: Default::default(),
        }
    }

    #[test]
    fn test_rank_round_trips_through_position() {
        for medal in Podium::ALL {
            assert_eq!(Podium::from_rank(i16::from(medal.rank())), Some(medal));
        }
        assert_eq!(Podium::from_rank(0), None);
        assert_eq!(Podium::from_rank(4), None);
    }

    #[test]
    fn test_outcome_recorded_only_with_gold() {
        let mut record = event(2026);
        assert!(!record.has_recorded_outcome());

        record.slot_mut(Podium::Silver).country_id = Some(Uuid::new_v4());
        assert!(!record.has_recorded_outcome());

        record.slot_mut(Podium::Gold).country_id = Some(Uuid::new_v4());
        assert!(record.has_recorded_outcome());
    }

    #[test]
    fn test_season_filter() {
        let record = event(2022);
        assert!(record.in_season(None));
        assert!(record.in_season(Some(2022)));
        assert!(!record.in_season(Some(2026)));
    }

    #[test]
    fn test_podium_iterates_in_rank_order() {
        let ranks: Vec<u8> = event(2026).podium().map(|(medal, _)| medal.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }
}
