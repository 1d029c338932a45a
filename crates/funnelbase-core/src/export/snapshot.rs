//! Read-only entity snapshots.
//!
//! The export engine never touches storage directly; it consumes a snapshot
//! taken through this seam. The store implements [`SnapshotSource`]; tests
//! substitute fixtures.

use crate::error::SyncResult;
use async_trait::async_trait;
use funnelbase_types::{Company, Contact, Deal, Lead, User};

/// The current contents of the five entity tables.
#[derive(Debug, Clone, Default)]
pub struct EntitySnapshot {
    pub users: Vec<User>,
    pub companies: Vec<Company>,
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub leads: Vec<Lead>,
}

/// Source of entity snapshots for the full dump.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Reads the current set of all entities. Read-only.
    async fn snapshot(&self) -> SyncResult<EntitySnapshot>;
}
