//! Export orchestrator.
//!
//! Composes the registry, registrar, mapper, batch encoder and client into
//! the two supported workflows: schema bring-up and full data dump. Both
//! are side-effecting and non-transactional; partial completion is surfaced
//! through the per-batch report, never hidden.

use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::export::client::{RemoteClient, UploadReceipt};
use crate::export::records::ObjectType;
use crate::export::snapshot::SnapshotSource;
use crate::export::status::RequestOutcome;
use crate::export::{batch, mapper, schema};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// One accepted batch inside a [`DumpReport`].
#[derive(Debug, Clone, Serialize)]
pub struct BatchSubmission {
    /// Object type of the batch.
    pub object_type: ObjectType,
    /// Number of records submitted.
    pub records: usize,
    /// Tracking information for the async request.
    pub receipt: UploadReceipt,
}

/// Result of a full data dump: every batch the remote system accepted for
/// processing, in submission order.
///
/// Acceptance is not application. The caller drives completion tracking by
/// polling [`ExportService::request_status`] with each receipt's
/// `client_request_id`.
#[derive(Debug, Clone, Serialize)]
pub struct DumpReport {
    pub batches: Vec<BatchSubmission>,
}

/// Orchestrates the outbound export workflows.
///
/// Sequential by design: one HTTP call at a time, each bounded by the fixed
/// per-call timeout. Nothing here retries; a mid-dump failure leaves the
/// already-accepted batches standing (stable `objectId`s make a re-run an
/// update, not a duplication).
pub struct ExportService {
    client: RemoteClient,
    base_url: String,
    snapshots: Arc<dyn SnapshotSource>,
}

impl ExportService {
    /// Builds the service from an explicit configuration.
    pub fn new(config: &SyncConfig, snapshots: Arc<dyn SnapshotSource>) -> SyncResult<Self> {
        Ok(Self {
            client: RemoteClient::new(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            snapshots,
        })
    }

    /// Direct access to the remote client.
    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    /// Registers a new integration and returns its id. Not idempotent.
    pub async fn register_integration(&self, name: &str, owner_email: &str) -> SyncResult<String> {
        let id = self.client.register_integration(name, owner_email).await?;
        tracing::info!(integration_id = %id, "integration registered");
        Ok(id)
    }

    /// Resolves the current integration id (first match wins).
    pub async fn integration_id(&self) -> SyncResult<String> {
        self.client.lookup_integration().await
    }

    /// Deletes an integration.
    pub async fn delete_integration(&self, integration_id: &str) -> SyncResult<()> {
        self.client.delete_integration(integration_id).await?;
        tracing::info!(integration_id = %integration_id, "integration deleted");
        Ok(())
    }

    /// Schema bring-up: resolve the integration, then make the remote
    /// schema match the desired-state table. Fails fast on the first error
    /// from either step.
    pub async fn ensure_schema(&self) -> SyncResult<()> {
        let integration_id = self.client.lookup_integration().await?;
        schema::ensure(&self.client, &integration_id).await
    }

    /// Full data dump: snapshot every entity table and submit one batch per
    /// object type, in fixed order (stages, users, companies, contacts,
    /// deals, leads).
    ///
    /// Fire-and-forget: this guarantees the batches were *accepted*, not
    /// *applied*, and does not poll. There is no rollback; recovering from
    /// a mid-dump failure means re-running, which updates rather than
    /// duplicates thanks to stable object ids.
    pub async fn run_full_dump(&self) -> SyncResult<DumpReport> {
        let integration_id = self.client.lookup_integration().await?;
        let snapshot = self.snapshots.snapshot().await?;
        let base = self.base_url.as_str();

        let mut batches = Vec::with_capacity(6);
        batches
            .push(self.submit(&integration_id, ObjectType::Stage, &mapper::stage_records()).await?);
        batches.push(
            self.submit(
                &integration_id,
                ObjectType::BusinessUser,
                &snapshot.users.iter().map(|u| mapper::map_user(u, base)).collect::<Vec<_>>(),
            )
            .await?,
        );
        batches.push(
            self.submit(
                &integration_id,
                ObjectType::Account,
                &snapshot
                    .companies
                    .iter()
                    .map(|c| mapper::map_company(c, base))
                    .collect::<Vec<_>>(),
            )
            .await?,
        );
        batches.push(
            self.submit(
                &integration_id,
                ObjectType::Contact,
                &snapshot
                    .contacts
                    .iter()
                    .map(|c| mapper::map_contact(c, base))
                    .collect::<Vec<_>>(),
            )
            .await?,
        );
        batches.push(
            self.submit(
                &integration_id,
                ObjectType::Deal,
                &snapshot.deals.iter().map(|d| mapper::map_deal(d, base)).collect::<Vec<_>>(),
            )
            .await?,
        );
        batches.push(
            self.submit(
                &integration_id,
                ObjectType::Lead,
                &snapshot.leads.iter().map(|l| mapper::map_lead(l, base)).collect::<Vec<_>>(),
            )
            .await?,
        );

        tracing::info!(batches = batches.len(), "full dump accepted");
        Ok(DumpReport { batches })
    }

    /// Polls the outcome of one previously accepted batch.
    pub async fn request_status(&self, client_request_id: &str) -> SyncResult<RequestOutcome> {
        let integration_id = self.client.lookup_integration().await?;
        self.client.request_status(&integration_id, client_request_id).await
    }

    /// Fetches previously ingested remote objects by id.
    pub async fn fetch_remote_objects(
        &self,
        object_type: ObjectType,
        object_ids: &[String],
    ) -> SyncResult<Value> {
        let integration_id = self.client.lookup_integration().await?;
        self.client.fetch_objects(&integration_id, object_type, object_ids).await
    }

    async fn submit<T: Serialize>(
        &self,
        integration_id: &str,
        object_type: ObjectType,
        records: &[T],
    ) -> SyncResult<BatchSubmission> {
        let payload = batch::to_ndjson(records)?;
        let receipt = self.client.upload_batch(integration_id, object_type, payload).await?;
        tracing::info!(
            object_type = %object_type,
            records = records.len(),
            client_request_id = %receipt.client_request_id,
            "batch accepted"
        );
        Ok(BatchSubmission { object_type, records: records.len(), receipt })
    }
}
