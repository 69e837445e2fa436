use std::mem;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;
use std::str::FromStr;

use crate::{Error, Result};

/// Signing context for request.
///
/// Built from `http::request::Parts` before signing, mutated by the signer
/// (date stamping, `Authorization` insertion), and applied back as the last
/// step before transmission. Any mutation after apply invalidates the
/// signature.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        let query_size = self.query_size();

        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            // Build path and query.
            uri_parts.path_and_query = {
                let paq = if query_size == 0 {
                    self.path
                } else {
                    let mut s = self.path;
                    s.reserve(query_size + 1);

                    s.push('?');
                    for (i, (k, v)) in self.query.iter().enumerate() {
                        if i > 0 {
                            s.push('&');
                        }

                        s.push_str(k);
                        if !v.is_empty() {
                            s.push('=');
                            s.push_str(v);
                        }
                    }

                    s
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get query size.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum::<usize>()
    }

    /// Convert sorted query to percent decoded string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn query_to_percent_decoded_string(
        mut query: Vec<(String, String)>,
        sep: &str,
        join: &str,
    ) -> String {
        let mut s = String::with_capacity(16);

        // Sort via query name.
        query.sort();

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            if !v.is_empty() {
                s.push_str(sep);
                s.push_str(&percent_encoding::percent_decode_str(&v).decode_utf8_lossy());
            }
        }

        s
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Get header names with given prefix.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.headers
            .iter()
            // Filter all header that starts with prefix
            .filter(|(k, _)| k.as_str().starts_with(prefix))
            // Convert all header name to lowercase
            .map(|(k, v)| {
                (
                    k.as_str().to_lowercase(),
                    v.to_str().expect("must be valid header").to_string(),
                )
            })
            .collect()
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (idx, (k, v)) in headers.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parts_for(uri: &str) -> http::request::Parts {
        http::Request::put(uri).body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_build_splits_path_and_query() {
        let mut parts = parts_for("https://acct.dfs.core.windows.net/fs/dir/file?action=append&position=0");
        let ctx = SigningRequest::build(&mut parts).unwrap();

        assert_eq!(ctx.method, Method::PUT);
        assert_eq!(ctx.path, "/fs/dir/file");
        assert_eq!(
            ctx.query,
            vec![
                ("action".to_string(), "append".to_string()),
                ("position".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_rejects_missing_authority() {
        let mut parts = http::Request::put("/fs?resource=file")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        let err = SigningRequest::build(&mut parts).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_apply_restores_uri() {
        let uri = "https://acct.dfs.core.windows.net/fs?resource=filesystem";
        let mut parts = parts_for(uri);
        let ctx = SigningRequest::build(&mut parts).unwrap();
        ctx.apply(&mut parts).unwrap();

        assert_eq!(parts.uri.to_string(), uri);
    }

    #[test]
    fn test_header_to_string_sorts() {
        let headers = vec![
            ("x-ms-version".to_string(), "2018-11-09".to_string()),
            ("x-ms-date".to_string(), "Mon, 01 Jan 2024 00:00:00 GMT".to_string()),
        ];
        assert_eq!(
            SigningRequest::header_to_string(headers, ":", "\n"),
            "x-ms-date:Mon, 01 Jan 2024 00:00:00 GMT\nx-ms-version:2018-11-09"
        );
    }

    #[test]
    fn test_query_to_percent_decoded_string() {
        let query = vec![
            ("resource".to_string(), "file%20system".to_string()),
            ("action".to_string(), "append".to_string()),
        ];
        assert_eq!(
            SigningRequest::query_to_percent_decoded_string(query, ":", "\n"),
            "action:append\nresource:file system"
        );
    }
}
