use std::fmt::Debug;

use bytes::Bytes;

use crate::Result;

/// HttpSend is used to transmit signed storage requests.
///
/// A process should own a single reusable implementation and share it across
/// calls; there is no correctness dependency on per-call construction. Tests
/// substitute a recording mock here instead of standing up a server.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response with a fully buffered body.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}
