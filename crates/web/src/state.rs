use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use podium_storage::Database;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub current_season: i32,
    pub submissions: SubmissionGuard,
}

impl AppState {
    pub fn new(db: Database, current_season: i32) -> Self {
        Self {
            db,
            current_season,
            submissions: SubmissionGuard::default(),
        }
    }

    pub fn season_or_current(&self, season: Option<i32>) -> i32 {
        season.unwrap_or(self.current_season)
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

/// Players with a pick submission currently running.
///
/// At most one submission per player runs at a time; a second one is turned
/// away instead of queued.
#[derive(Clone, Default)]
pub struct SubmissionGuard {
    in_flight: Arc<Mutex<HashSet<Uuid>>>,
}

impl SubmissionGuard {
    /// Marks `player_id` as busy until the returned permit is dropped.
    pub fn try_acquire(&self, player_id: Uuid) -> Option<SubmissionPermit> {
        if !self.lock().insert(player_id) {
            return None;
        }

        Some(SubmissionPermit {
            guard: self.clone(),
            player_id,
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Uuid>> {
        // the set stays consistent even if a holder panicked
        self.in_flight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct SubmissionPermit {
    guard: SubmissionGuard,
    player_id: Uuid,
}

impl Drop for SubmissionPermit {
    fn drop(&mut self) {
        self.guard.lock().remove(&self.player_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submission_for_same_player_is_refused() {
        let guard = SubmissionGuard::default();
        let player = Uuid::new_v4();

        let permit = guard.try_acquire(player);
        assert!(permit.is_some());
        assert!(guard.try_acquire(player).is_none());
        assert!(guard.try_acquire(Uuid::new_v4()).is_some());

        drop(permit);
        assert!(guard.try_acquire(player).is_some());
    }
}
