use http::header::HeaderName;

// Headers used by the DFS endpoint.
pub const X_MS_DATE: HeaderName = HeaderName::from_static("x-ms-date");
pub const X_MS_VERSION: HeaderName = HeaderName::from_static("x-ms-version");
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

/// REST protocol version stamped on every request.
pub const ADLS_VERSION: &str = "2018-11-09";

// Env values used to configure the client.
pub const STORAGE_ACCOUNT_NAME: &str = "StorageAccountName";
pub const STORAGE_ACCOUNT_KEY: &str = "StorageAccountKey";
pub const APPLICATION: &str = "Application";

/// Content type of encoded record batches.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Filesystem batches land in unless configured otherwise.
pub const DEFAULT_FILESYSTEM: &str = "raw";
