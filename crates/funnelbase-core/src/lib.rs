//! # Funnelbase Core
//!
//! Business logic for the Funnelbase CRM:
//!
//! - **`store`** - embedded SQLite store for the five entity tables
//! - **`export`** - outbound export engine mirroring the CRM into a
//!   third-party CRM-ingestion API
//! - **`config`** - explicit sync configuration (no process-wide globals)
//! - **`error`** - error taxonomy shared by the store and the engine
//!
//! The export engine is deliberately best-effort: batches are submitted
//! asynchronously and their outcome is only known through a later status
//! poll. Nothing in this crate retries on its own; every failure propagates
//! to the caller.

pub mod config;
pub mod error;
pub mod export;
pub mod store;

pub use config::SyncConfig;
pub use error::{StoreError, SyncError, SyncResult};
pub use export::{
    BatchSubmission, DumpReport, EntitySnapshot, ExportService, ObjectType, RemoteClient,
    RequestOutcome, SnapshotSource, UploadReceipt,
};
pub use store::Store;
