//! Batch ingestion: encode the records, land them via the staged protocol,
//! report the completion record.

use log::info;
use serde::Serialize;

use lakeload_core::time::now;
use lakeload_core::{retry_with_backoff, Result, RetryPolicy};

use crate::constants::NDJSON_CONTENT_TYPE;
use crate::ndjson::to_ndjson;
use crate::route::{CatalogRecord, Destination, Route};
use crate::{AdlsClient, Config};

/// Lands record batches in the lake and produces the completion record the
/// downstream catalog queue consumes.
///
/// A batch either fully lands (file created, appended, flushed, completion
/// record returned) or the error from the exhausted retry surfaces and
/// nothing is reported. The remote service may retain a partially written
/// file from an incomplete staged sequence; that interim state is visible
/// to readers and not masked here.
#[derive(Clone, Debug)]
pub struct Ingestor {
    client: AdlsClient,
    filesystem: String,
    application: String,
    upload_retry: RetryPolicy,
}

impl Ingestor {
    /// Build an ingestor from config with the default transport.
    pub fn new(config: &Config) -> Result<Self> {
        let mut client = AdlsClient::new(config.credential()?);
        if let Some(endpoint) = &config.endpoint {
            client = client.with_endpoint(endpoint);
        }

        Ok(Self::with_client(client, config))
    }

    /// Build an ingestor around an existing client.
    pub fn with_client(client: AdlsClient, config: &Config) -> Self {
        Self {
            client,
            filesystem: config.filesystem().to_string(),
            application: config.application.clone().unwrap_or_default(),
            upload_retry: config.upload_retry.clone(),
        }
    }

    /// Ingest one batch: encode the records as newline-delimited JSON and
    /// land them at a destination computed from `route` and the current
    /// time, with a fresh file id.
    pub async fn ingest<T: Serialize>(&self, route: &Route, records: &[T]) -> Result<CatalogRecord> {
        self.ingest_at(route, records, Destination::new(route, now()))
            .await
    }

    /// Ingest one batch into an explicit destination.
    ///
    /// The whole staged upload runs as one unit under the configured retry
    /// policy: a failure partway through create→append→flush restarts the
    /// sequence from create, which overwrites whatever the failed attempt
    /// left behind.
    pub async fn ingest_at<T: Serialize>(
        &self,
        route: &Route,
        records: &[T],
        destination: Destination,
    ) -> Result<CatalogRecord> {
        // Encoding failures are fatal; retrying cannot change the outcome.
        let payload = to_ndjson(records)?;

        info!(
            "writing batch of {} records to {}",
            records.len(),
            destination.file_path
        );

        let client = &self.client;
        let filesystem = self.filesystem.as_str();
        let file_path = destination.file_path.as_str();
        let payload = payload.as_slice();
        retry_with_backoff(&self.upload_retry, || {
            client.upload_file(filesystem, file_path, payload, NDJSON_CONTENT_TYPE)
        })
        .await?;

        info!("batch landed at {}", destination.file_path);

        Ok(CatalogRecord {
            file_guid: destination.file_guid.clone(),
            filesystem: self.filesystem.clone(),
            file_path: destination.file_path.clone(),
            sender: format!("{}-{}", self.application, route.source_name),
            application: self.application.clone(),
            source_type: "Event".to_string(),
            delimiter: route.delimiter.clone(),
            ingestion_type: route.ingestion_type.clone(),
            folder_path: destination.folder_path,
        })
    }
}
