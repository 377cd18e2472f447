use uuid::Uuid;

use crate::error::Result;
use crate::services::reconcile::{CreateOp, UpdateOp};

/// Outcome of a write-permission query against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    pub granted: bool,
    /// Human-readable explanation, set when the permission is refused
    pub reason: Option<String>,
}

impl PermissionCheck {
    pub fn granted() -> Self {
        Self {
            granted: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            reason: Some(reason.into()),
        }
    }
}

/// Write boundary for picks.
///
/// Entries of one call may be applied independently of each other; callers
/// must not assume anything beyond the returned result.
#[async_trait::async_trait]
pub trait PickStore: Send + Sync {
    async fn check_create_permission(&self, player_id: Uuid) -> Result<PermissionCheck>;

    /// Inserts the picks and returns their new identifiers in input order.
    async fn create_many(&self, ops: &[CreateOp]) -> Result<Vec<Uuid>>;

    async fn update_many(&self, ops: &[UpdateOp]) -> Result<()>;
}
