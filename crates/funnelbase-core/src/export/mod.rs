//! Outbound export engine.
//!
//! Mirrors the CRM's relational data into a third-party CRM-ingestion API
//! ("the remote system"). Data flows one direction:
//!
//! ```text
//! SnapshotSource → mapper → batch (ndjson) → RemoteClient::upload_batch
//!                                          → (remote system)
//!                                          → RemoteClient::request_status
//! ```
//!
//! The integration registry and the schema registrar are control-plane
//! prerequisites consulted before any data flows. Uploads are asynchronous
//! on the remote side: a submit call only yields tracking information, and
//! the actual outcome is learned through [`RemoteClient::request_status`].
//!
//! ## Key invariants
//!
//! - Every record's `objectId` is the string form of the local primary key,
//!   so re-running an export updates remote objects instead of duplicating
//!   them.
//! - A batch contains records of exactly one [`ObjectType`].
//! - Schema registration for an object type completes before any batch of
//!   that type is submitted.
//! - No retries anywhere; every failure propagates as a
//!   [`crate::SyncError`].

pub mod batch;
pub mod client;
pub mod mapper;
pub mod records;
pub mod schema;
pub mod service;
pub mod snapshot;
pub mod status;
pub mod timefmt;

pub use client::{RemoteClient, UploadReceipt};
pub use records::ObjectType;
pub use schema::SchemaField;
pub use service::{BatchSubmission, DumpReport, ExportService};
pub use snapshot::{EntitySnapshot, SnapshotSource};
pub use status::{BatchError, RequestOutcome};
pub use timefmt::WireTimestamp;
