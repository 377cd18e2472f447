use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::Pick;
use crate::services::status::EventStatus;
use crate::traits::PickStore;

/// Maximum number of picks sent to the store in one create or update call.
pub const PICK_BATCH_SIZE: usize = 50;

/// A podium guess as edited by the player; positions may still be empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PodiumPick {
    pub gold: Option<Uuid>,
    pub silver: Option<Uuid>,
    pub bronze: Option<Uuid>,
}

impl PodiumPick {
    pub fn complete(&self) -> Option<CompletePodium> {
        Some(CompletePodium {
            gold: self.gold?,
            silver: self.silver?,
            bronze: self.bronze?,
        })
    }
}

/// A podium guess with all three positions filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletePodium {
    pub gold: Uuid,
    pub silver: Uuid,
    pub bronze: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOp {
    pub player_id: Uuid,
    pub event_id: Uuid,
    pub podium: CompletePodium,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOp {
    pub pick_id: Uuid,
    pub player_id: Uuid,
    pub event_id: Uuid,
    pub podium: CompletePodium,
}

/// Which pick record holds a player's guess for each event.
///
/// Must be merged with every identifier the store hands back before the
/// next reconciliation, otherwise a resubmission creates duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickLedger {
    player_id: Uuid,
    entries: HashMap<Uuid, Uuid>,
}

impl PickLedger {
    pub fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            entries: HashMap::new(),
        }
    }

    /// Builds the ledger from persisted picks, ignoring other players' picks.
    pub fn from_picks(player_id: Uuid, picks: &[Pick]) -> Self {
        let mut ledger = Self::new(player_id);
        for pick in picks.iter().filter(|pick| pick.player_id == player_id) {
            ledger.record(pick.event_id, pick.pick_id);
        }
        ledger
    }

    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    pub fn pick_for(&self, event_id: Uuid) -> Option<Uuid> {
        self.entries.get(&event_id).copied()
    }

    pub fn record(&mut self, event_id: Uuid, pick_id: Uuid) {
        self.entries.insert(event_id, pick_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writes needed to bring the persisted picks in line with the desired ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_create: Vec<CreateOp>,
    pub to_update: Vec<UpdateOp>,
    pub skipped_incomplete: usize,
    pub skipped_frozen: usize,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty()
    }

    pub fn create_batches(&self) -> std::slice::Chunks<'_, CreateOp> {
        self.to_create.chunks(PICK_BATCH_SIZE)
    }

    pub fn update_batches(&self) -> std::slice::Chunks<'_, UpdateOp> {
        self.to_update.chunks(PICK_BATCH_SIZE)
    }
}

/// Diffs the desired picks against the ledger.
///
/// Incomplete podiums are skipped, as is every event whose status is frozen.
/// Status comes from the caller and is not re-derived here; pass a fresh map.
pub fn reconcile(
    desired: &BTreeMap<Uuid, PodiumPick>,
    ledger: &PickLedger,
    statuses: &HashMap<Uuid, EventStatus>,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();

    for (&event_id, pick) in desired {
        let Some(podium) = pick.complete() else {
            plan.skipped_incomplete += 1;
            continue;
        };

        if statuses.get(&event_id).is_some_and(|status| status.is_frozen()) {
            plan.skipped_frozen += 1;
            continue;
        }

        match ledger.pick_for(event_id) {
            Some(pick_id) => plan.to_update.push(UpdateOp {
                pick_id,
                player_id: ledger.player_id(),
                event_id,
                podium,
            }),
            None => plan.to_create.push(CreateOp {
                player_id: ledger.player_id(),
                event_id,
                podium,
            }),
        }
    }

    debug!(
        player_id = %ledger.player_id(),
        creates = plan.to_create.len(),
        updates = plan.to_update.len(),
        skipped_incomplete = plan.skipped_incomplete,
        skipped_frozen = plan.skipped_frozen,
        "Reconciled picks"
    );

    plan
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmitReport {
    pub created: usize,
    pub updated: usize,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Permission denied: {reason}")]
    PermissionDenied { reason: String },

    #[error("Permission check failed: {0}")]
    PermissionCheck(#[source] StorageError),

    #[error(
        "Create batch {batch}/{batches} failed ({attempted} picks attempted, {created} created before it): {source}"
    )]
    CreateBatchFailed {
        batch: usize,
        batches: usize,
        attempted: usize,
        created: usize,
        #[source]
        source: StorageError,
    },

    #[error(
        "Update batch {batch}/{batches} failed ({attempted} picks attempted, {created} created and {updated} updated before it): {source}"
    )]
    UpdateBatchFailed {
        batch: usize,
        batches: usize,
        attempted: usize,
        created: usize,
        updated: usize,
        #[source]
        source: StorageError,
    },
}

/// Applies a plan through the store, creates first, one batch at a time.
///
/// Permission is checked once before anything is written. Identifiers of
/// created picks are recorded in `ledger` as each batch is acknowledged, so
/// after a failure the caller can reconcile again against the same ledger
/// and only the writes that never landed are attempted as creates.
/// Acknowledged batches are never rolled back.
pub async fn submit<S>(
    store: &S,
    ledger: &mut PickLedger,
    plan: &ReconcilePlan,
) -> Result<SubmitReport, SubmitError>
where
    S: PickStore + ?Sized,
{
    let mut report = SubmitReport::default();
    if plan.is_empty() {
        return Ok(report);
    }

    let permission = store
        .check_create_permission(ledger.player_id())
        .await
        .map_err(SubmitError::PermissionCheck)?;
    if !permission.granted {
        let reason = permission
            .reason
            .unwrap_or_else(|| "Picks cannot be saved for this player".to_string());
        warn!(player_id = %ledger.player_id(), %reason, "Pick submission refused");
        return Err(SubmitError::PermissionDenied { reason });
    }

    let batches = plan.create_batches().len();
    for (index, batch) in plan.create_batches().enumerate() {
        debug!(batch = index + 1, batches, size = batch.len(), "Creating picks");

        let pick_ids = store.create_many(batch).await.map_err(|source| {
            warn!(batch = index + 1, batches, error = %source, "Create batch failed");
            SubmitError::CreateBatchFailed {
                batch: index + 1,
                batches,
                attempted: batch.len(),
                created: report.created,
                source,
            }
        })?;

        if pick_ids.len() != batch.len() {
            warn!(
                expected = batch.len(),
                returned = pick_ids.len(),
                "Store returned an unexpected number of pick ids"
            );
        }

        for (op, pick_id) in batch.iter().zip(pick_ids) {
            ledger.record(op.event_id, pick_id);
            report.created += 1;
        }
    }

    let batches = plan.update_batches().len();
    for (index, batch) in plan.update_batches().enumerate() {
        debug!(batch = index + 1, batches, size = batch.len(), "Updating picks");

        store.update_many(batch).await.map_err(|source| {
            warn!(batch = index + 1, batches, error = %source, "Update batch failed");
            SubmitError::UpdateBatchFailed {
                batch: index + 1,
                batches,
                attempted: batch.len(),
                created: report.created,
                updated: report.updated,
                source,
            }
        })?;

        report.updated += batch.len();
    }

    Ok(report)
}
