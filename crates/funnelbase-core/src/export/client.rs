//! HTTP client for the remote CRM-ingestion API.
//!
//! Every call carries basic auth (access key / secret) and the fixed
//! per-call timeout from [`SyncConfig`]. Transport failures surface as
//! [`SyncError::RemoteUnreachable`], non-success statuses as
//! [`SyncError::RemoteRejected`] with the status code and body text. No
//! call is ever retried here.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::export::records::ObjectType;
use crate::export::schema::SchemaField;
use crate::export::status::RequestOutcome;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// Tracking information for one accepted upload.
///
/// The remote system processes uploads asynchronously: acceptance means the
/// batch was queued, not applied. Poll [`RemoteClient::request_status`] with
/// `client_request_id` to learn the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    /// Client-generated idempotent tracking id for this submission.
    pub client_request_id: String,
    /// Raw per-object async request info returned by the remote system.
    pub response: Value,
}

/// Client for the remote system's HTTP surface.
pub struct RemoteClient {
    http: reqwest::Client,
    api_url: String,
    access_key: String,
    access_key_secret: String,
}

impl RemoteClient {
    /// Builds a client with the configured fixed per-call timeout.
    pub fn new(config: &SyncConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SyncError::from_transport)?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            access_key_secret: config.access_key_secret.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> SyncResult<Response> {
        request
            .basic_auth(&self.access_key, Some(&self.access_key_secret))
            .send()
            .await
            .map_err(SyncError::from_transport)
    }

    async fn rejected(response: Response) -> SyncError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        SyncError::RemoteRejected { status, body }
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> SyncResult<T> {
        response.json().await.map_err(|e| SyncError::InvalidResponse(e.to_string()))
    }

    /// Registers a new integration. NOT idempotent: calling this twice may
    /// create two integrations on the remote side.
    pub async fn register_integration(&self, name: &str, owner_email: &str) -> SyncResult<String> {
        let payload = serde_json::json!({
            "name": name,
            "ownerEmail": owner_email,
        });
        let response =
            self.send(self.http.put(self.url("/crm/integrations")).json(&payload)).await?;
        if response.status() != StatusCode::OK {
            return Err(Self::rejected(response).await);
        }
        let registered: IntegrationRegistered = Self::decode(response).await?;
        Ok(registered.integration_id.into_string())
    }

    /// Looks up the current integration id.
    ///
    /// The first listed integration wins; the listing order is defined by
    /// the remote system, and this design assumes at most one active
    /// integration per credential set. Fails with
    /// [`SyncError::NotConfigured`] when none exist.
    pub async fn lookup_integration(&self) -> SyncResult<String> {
        let response = self.send(self.http.get(self.url("/crm/integrations"))).await?;
        if response.status() != StatusCode::OK {
            return Err(Self::rejected(response).await);
        }
        let listing: IntegrationListing = Self::decode(response).await?;
        listing
            .integrations
            .into_iter()
            .next()
            .map(|entry| entry.integration_id.into_string())
            .ok_or(SyncError::NotConfigured)
    }

    /// Deletes an integration.
    ///
    /// The remote system acknowledges deletion with 201 specifically, not
    /// the 200-family code used elsewhere; anything else is a rejection.
    pub async fn delete_integration(&self, integration_id: &str) -> SyncResult<()> {
        let client_request_id = Uuid::new_v4().to_string();
        let response = self
            .send(self.http.delete(self.url("/crm/integrations")).query(&[
                ("clientRequestId", client_request_id.as_str()),
                ("integrationId", integration_id),
            ]))
            .await?;
        if response.status() != StatusCode::CREATED {
            return Err(Self::rejected(response).await);
        }
        Ok(())
    }

    /// Fetches the unique names of the currently selected schema fields for
    /// one object type.
    pub async fn selected_field_names(
        &self,
        integration_id: &str,
        object_type: ObjectType,
    ) -> SyncResult<Vec<String>> {
        let response = self
            .send(self.http.get(self.url("/crm/entity-schema")).query(&[
                ("integrationId", integration_id),
                ("objectType", object_type.as_str()),
            ]))
            .await?;
        if response.status() != StatusCode::OK {
            return Err(Self::rejected(response).await);
        }
        let schema: SchemaResponse = Self::decode(response).await?;
        Ok(schema
            .object_type_to_selected_fields
            .get(object_type.as_str())
            .map(|fields| fields.iter().map(|f| f.unique_name.clone()).collect())
            .unwrap_or_default())
    }

    /// Declares custom schema fields for one object type. Redeclaring
    /// already-present fields is a no-op on the remote side by contract of
    /// the remote API.
    pub async fn declare_fields(
        &self,
        integration_id: &str,
        object_type: ObjectType,
        fields: &[SchemaField],
    ) -> SyncResult<()> {
        let response = self
            .send(
                self.http
                    .post(self.url("/crm/entity-schema"))
                    .query(&[
                        ("integrationId", integration_id),
                        ("objectType", object_type.as_str()),
                    ])
                    .json(fields),
            )
            .await?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(Self::rejected(response).await);
        }
        Ok(())
    }

    /// Uploads one ndjson batch for one object type.
    ///
    /// The entire batch goes up as a single file upload; batching is by
    /// object type, not by size. Success is 200 or 201 and only means the
    /// batch was accepted for processing.
    pub async fn upload_batch(
        &self,
        integration_id: &str,
        object_type: ObjectType,
        payload: Vec<u8>,
    ) -> SyncResult<UploadReceipt> {
        let client_request_id = Uuid::new_v4().to_string();
        let file_name = format!("{}.ldjson", object_type.as_str().to_lowercase());
        let form = Form::new().part("dataFile", Part::bytes(payload).file_name(file_name));

        let response = self
            .send(
                self.http
                    .post(self.url("/crm/entities"))
                    .query(&[
                        ("clientRequestId", client_request_id.as_str()),
                        ("integrationId", integration_id),
                        ("objectType", object_type.as_str()),
                    ])
                    .multipart(form),
            )
            .await?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(Self::rejected(response).await);
        }
        let body: Value = Self::decode(response).await?;
        Ok(UploadReceipt { client_request_id, response: body })
    }

    /// Polls the outcome of a previously submitted request. A single call,
    /// never a loop: retry cadence is the caller's decision.
    pub async fn request_status(
        &self,
        integration_id: &str,
        client_request_id: &str,
    ) -> SyncResult<RequestOutcome> {
        let response = self
            .send(self.http.get(self.url("/crm/request-status")).query(&[
                ("integrationId", integration_id),
                ("clientRequestId", client_request_id),
            ]))
            .await?;
        if response.status() != StatusCode::OK {
            return Err(Self::rejected(response).await);
        }
        let body: Value = Self::decode(response).await?;
        RequestOutcome::from_body(&body)
    }

    /// Fetches previously ingested remote objects by id.
    pub async fn fetch_objects(
        &self,
        integration_id: &str,
        object_type: ObjectType,
        object_ids: &[String],
    ) -> SyncResult<Value> {
        let response = self
            .send(
                self.http
                    .get(self.url("/crm/entities"))
                    .query(&[
                        ("integrationId", integration_id),
                        ("objectType", object_type.as_str()),
                    ])
                    .json(object_ids),
            )
            .await?;
        if response.status() != StatusCode::OK {
            return Err(Self::rejected(response).await);
        }
        Self::decode(response).await
    }
}

/// Integration ids arrive as strings or bare numbers depending on the
/// remote implementation; both forms collapse to a string here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Str(String),
    Num(i64),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Num(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntegrationRegistered {
    integration_id: IdValue,
}

#[derive(Deserialize)]
struct IntegrationListing {
    #[serde(default)]
    integrations: Vec<IntegrationEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntegrationEntry {
    integration_id: IdValue,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaResponse {
    #[serde(default)]
    object_type_to_selected_fields: HashMap<String, Vec<SelectedField>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectedField {
    unique_name: String,
}
