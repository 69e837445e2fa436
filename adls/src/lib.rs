//! Shared-key client for the hierarchical (DFS) endpoint of a storage
//! account, plus the batch ingestion built on top of it.
//!
//! The crate covers:
//!
//! - Shared Key request signing ([`RequestSigner`])
//! - filesystem/path operations and the create→append→flush staged upload
//!   ([`AdlsClient`])
//! - newline-delimited JSON batch encoding ([`to_ndjson`])
//! - destination path layout and the completion record ([`Route`],
//!   [`Destination`], [`CatalogRecord`])
//! - the ingestion orchestration tying those together ([`Ingestor`])
//!
//! # Example
//!
//! ```rust,no_run
//! use anyhow::Result;
//! use lakeload_adls::{Config, Ingestor, Route};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Credentials and application name from the environment
//!     // (StorageAccountName / StorageAccountKey / Application).
//!     let config = Config::default().from_env();
//!     let ingestor = Ingestor::new(&config)?;
//!
//!     let route = Route {
//!         region: "global".to_string(),
//!         security_level: "internal".to_string(),
//!         subject_area: "property".to_string(),
//!         source_name: "feelslike".to_string(),
//!         delimiter: ",".to_string(),
//!         ingestion_type: "stream".to_string(),
//!     };
//!
//!     let records = vec![json!({"device": "sensor-1", "temp": 21.5})];
//!     let landed = ingestor.ingest(&route, &records).await?;
//!     println!("landed {} at {}", landed.file_guid, landed.file_path);
//!
//!     // `landed` is ready to hand to the catalog queue.
//!     Ok(())
//! }
//! ```
//!
//! # Cancellation
//!
//! Every client call is an independently cancellable unit of work: dropping
//! its future aborts the in-flight request and short-circuits any pending
//! backoff sleep. Wrap a call in `tokio::time::timeout` for a deadline.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod transport;
pub use transport::ReqwestHttpSend;

mod client;
pub use client::AdlsClient;

mod ndjson;
pub use ndjson::to_ndjson;

mod route;
pub use route::{CatalogRecord, Destination, Route};

mod ingest;
pub use ingest::Ingestor;
