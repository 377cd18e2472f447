use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::dto::events::{DayGroup, DisciplineGroup, EventBoard, EventSummary};
use crate::models::OutcomeRecord;
use crate::services::status::{EventStatus, StatusWindows};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLimits {
    pub upcoming: usize,
    pub recent: usize,
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self {
            upcoming: 8,
            recent: 5,
        }
    }
}

pub fn annotate(
    events: &[OutcomeRecord],
    windows: &StatusWindows,
    now: DateTime<Utc>,
) -> Vec<EventSummary> {
    events
        .iter()
        .map(|event| EventSummary::new(event, windows.resolve_event(event, now)))
        .collect()
}

/// Recent results, live events and the next upcoming events.
///
/// Each event lands in at most one of `live` and `upcoming`. Events without
/// a scheduled time are left off the board.
pub fn board(
    events: &[OutcomeRecord],
    now: DateTime<Utc>,
    windows: &StatusWindows,
    limits: BoardLimits,
) -> EventBoard {
    let mut dated: Vec<&OutcomeRecord> = events.iter().filter(|e| e.scheduled_at.is_some()).collect();
    dated.sort_by_key(|e| e.scheduled_at);

    let recent_results = dated
        .iter()
        .rev()
        .filter(|e| e.has_recorded_outcome())
        .take(limits.recent)
        .map(|e| EventSummary::new(e, EventStatus::Final))
        .collect();

    let live = dated
        .iter()
        .map(|e| EventSummary::new(e, windows.resolve_event(e, now)))
        .filter(|summary| summary.status == EventStatus::Live)
        .collect();

    let mut upcoming: Vec<DayGroup> = Vec::new();
    for summary in dated
        .iter()
        .map(|e| EventSummary::new(e, windows.resolve_event(e, now)))
        .filter(|summary| summary.status == EventStatus::Upcoming)
        .take(limits.upcoming)
    {
        let Some(day) = summary.scheduled_at.map(|at| at.date_naive()) else {
            continue;
        };

        match upcoming.last_mut() {
            Some(group) if group.day == day => group.events.push(summary),
            _ => upcoming.push(DayGroup {
                day,
                events: vec![summary],
            }),
        }
    }

    EventBoard {
        recent_results,
        live,
        upcoming,
    }
}

/// Events grouped by discipline, busiest discipline first.
///
/// Within a group events run soonest first; unscheduled events come last,
/// by name. Events without a discipline are left out.
pub fn by_discipline(
    events: &[OutcomeRecord],
    windows: &StatusWindows,
    now: DateTime<Utc>,
) -> Vec<DisciplineGroup> {
    let mut groups: HashMap<&str, Vec<&OutcomeRecord>> = HashMap::new();
    for event in events {
        if let Some(discipline) = event.discipline.as_deref().filter(|d| !d.is_empty()) {
            groups.entry(discipline).or_default().push(event);
        }
    }

    let mut groups: Vec<(&str, Vec<&OutcomeRecord>)> = groups.into_iter().collect();
    groups.sort_by_key(|&(discipline, ref events)| (Reverse(events.len()), discipline));

    groups
        .into_iter()
        .map(|(discipline, mut events)| {
            events.sort_by(|a, b| schedule_order(a, b));
            DisciplineGroup {
                discipline: discipline.to_string(),
                events: events
                    .into_iter()
                    .map(|e| EventSummary::new(e, windows.resolve_event(e, now)))
                    .collect(),
            }
        })
        .collect()
}

fn schedule_order(a: &OutcomeRecord, b: &OutcomeRecord) -> Ordering {
    match (a.scheduled_at, b.scheduled_at) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}
