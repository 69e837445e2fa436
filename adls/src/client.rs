//! Path operations and the staged upload protocol for the DFS endpoint.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, RANGE};
use log::debug;

use lakeload_core::{Error, HttpSend, Result};

use crate::constants::{ADLS_VERSION, X_MS_VERSION};
use crate::transport::ReqwestHttpSend;
use crate::{Credential, RequestSigner};

/// Client for the hierarchical (DFS) endpoint of a storage account.
///
/// Methods take `&self`; separate calls share nothing but the immutable
/// credential and the transport, so concurrent use needs no locking. A
/// single staged upload is internally sequential, but uploads to different
/// paths may run concurrently. Every call is a short-lived unit of work:
/// dropping its future aborts the in-flight request.
#[derive(Clone, Debug)]
pub struct AdlsClient {
    credential: Credential,
    signer: RequestSigner,
    http: Arc<dyn HttpSend>,
    endpoint: String,
}

impl AdlsClient {
    /// Create a client for `https://<account>.dfs.core.windows.net` with the
    /// default reqwest transport.
    pub fn new(credential: Credential) -> Self {
        let endpoint = format!("https://{}.dfs.core.windows.net", credential.account_name);
        Self {
            credential,
            signer: RequestSigner::new(),
            http: Arc::new(ReqwestHttpSend::default()),
            endpoint,
        }
    }

    /// Replace the transport, e.g. to share one process-wide client or to
    /// substitute a mock in tests.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Override the endpoint, e.g. for an emulator.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self, filesystem: &str, path: &str, query: &str) -> String {
        let filesystem = filesystem.trim_matches('/');
        let path = path.trim_matches('/');

        let mut s = format!("{}/{filesystem}", self.endpoint);
        if !path.is_empty() {
            s.push('/');
            s.push_str(path);
        }
        if !query.is_empty() {
            s.push('?');
            s.push_str(query);
        }
        s
    }

    /// Stamp the protocol version, sign, and transmit one request.
    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (mut parts, body) = req.into_parts();
        parts
            .headers
            .insert(X_MS_VERSION, HeaderValue::from_static(ADLS_VERSION));
        self.signer.sign(&mut parts, &self.credential)?;

        self.http
            .http_send(http::Request::from_parts(parts, body))
            .await
    }

    async fn send_expect_success(
        &self,
        req: http::Request<Bytes>,
        what: &str,
    ) -> Result<http::Response<Bytes>> {
        let resp = self.send(req).await?;
        if !resp.status().is_success() {
            return Err(Error::http_status(
                resp.status().as_u16(),
                format!("{what} failed with status {}", resp.status()),
            ));
        }
        Ok(resp)
    }

    /// Create a filesystem (`PUT ?resource=filesystem`).
    ///
    /// Creating a filesystem that already exists is not an error at this
    /// layer: the raw response body is returned either way and the remote
    /// service defines the exact semantics.
    pub async fn create_filesystem(&self, filesystem: &str) -> Result<String> {
        let req = http::Request::put(self.url(filesystem, "", "resource=filesystem"))
            .body(Bytes::new())?;
        let resp = self.send(req).await?;

        Ok(String::from_utf8_lossy(resp.body()).into_owned())
    }

    /// Create a directory (`PUT ?resource=directory`).
    pub async fn create_directory(&self, filesystem: &str, path: &str) -> Result<String> {
        let req = http::Request::put(self.url(filesystem, path, "resource=directory"))
            .body(Bytes::new())?;
        let resp = self.send(req).await?;

        Ok(String::from_utf8_lossy(resp.body()).into_owned())
    }

    /// Create (or overwrite) an empty file (`PUT ?resource=file`).
    ///
    /// Must precede any append to that path.
    pub async fn create_file(&self, filesystem: &str, path: &str) -> Result<()> {
        let req =
            http::Request::put(self.url(filesystem, path, "resource=file")).body(Bytes::new())?;
        self.send(req).await?;

        Ok(())
    }

    /// List the filesystems in the account (`GET ?resource=account`).
    pub async fn list_filesystems(&self) -> Result<String> {
        let req = http::Request::get(format!("{}/?resource=account", self.endpoint))
            .body(Bytes::new())?;
        let resp = self.send(req).await?;

        Ok(String::from_utf8_lossy(resp.body()).into_owned())
    }

    /// Read a file's content (`GET`), optionally restricted to a byte range.
    ///
    /// A supplied range is passed verbatim as a `Range` header; the service
    /// clamps ranges that run past the end of the file. Unlike the create
    /// operations this call fails with an [`ErrorKind::HttpStatus`] error on
    /// a non-success status: callers consume the body as content, and a
    /// failed request has no meaningful content.
    ///
    /// [`ErrorKind::HttpStatus`]: lakeload_core::ErrorKind::HttpStatus
    pub async fn read_file_content(
        &self,
        filesystem: &str,
        path: &str,
        range: Option<&str>,
    ) -> Result<Bytes> {
        let mut req = http::Request::get(self.url(filesystem, path, ""));
        if let Some(range) = range {
            req = req.header(RANGE, range);
        }

        let resp = self
            .send_expect_success(req.body(Bytes::new())?, "read")
            .await?;
        Ok(resp.into_body())
    }

    /// Write `content` to `path` via the staged protocol: create the file,
    /// append the whole payload at position 0, flush at the payload length
    /// to commit `[0, len)`.
    ///
    /// The three calls are strictly sequential, and each must come back
    /// with a success status before the next is issued. A failure before
    /// the flush leaves a zero-length or partially written remote file; the
    /// protocol has no resume, so the only recovery is to run the whole
    /// sequence again (create overwrites). Zero-length content is valid: an
    /// empty append and a flush at position 0.
    pub async fn upload_file(
        &self,
        filesystem: &str,
        path: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<()> {
        debug!("creating file {filesystem}/{path}");
        let create =
            http::Request::put(self.url(filesystem, path, "resource=file")).body(Bytes::new())?;
        self.send_expect_success(create, "create").await?;

        // The declared length is measured on the bytes actually transmitted,
        // never on a caller-supplied estimate; the signature covers the
        // exact Content-Length header.
        let len = content.len();

        debug!("appending {len} bytes to {filesystem}/{path}");
        let append = http::Request::patch(self.url(filesystem, path, "action=append&position=0"))
            .header(CONTENT_LENGTH, len)
            .header(CONTENT_TYPE, content_type)
            .body(Bytes::copy_from_slice(content))?;
        self.send_expect_success(append, "append").await?;

        debug!("flushing {filesystem}/{path} at position {len}");
        let flush =
            http::Request::patch(self.url(filesystem, path, &format!("action=flush&position={len}")))
                .body(Bytes::new())?;
        self.send_expect_success(flush, "flush").await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_trims_separators() {
        let client = AdlsClient::new(Credential::new("acct", "c2VjcmV0"));

        assert_eq!(
            client.url("/fs/", "", "resource=filesystem"),
            "https://acct.dfs.core.windows.net/fs?resource=filesystem"
        );
        assert_eq!(
            client.url("fs", "/dir/file", ""),
            "https://acct.dfs.core.windows.net/fs/dir/file"
        );
    }
}
