//! ADLS Gen2 Shared Key request signer.

use std::fmt::Write;

use http::header::*;
use log::debug;

use lakeload_core::hash::{base64_decode, base64_hmac_sha256};
use lakeload_core::time::{format_http_date, now, DateTime};
use lakeload_core::{Error, Result, SigningRequest};

use crate::constants::{CONTENT_MD5, X_MS_DATE};
use crate::Credential;

/// RequestSigner that implements the storage Shared Key authorization
/// scheme.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Clone, Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a signer.
    pub fn new() -> Self {
        Self
    }

    /// Sign the request with the current time.
    pub fn sign(&self, parts: &mut http::request::Parts, cred: &Credential) -> Result<()> {
        self.sign_at(parts, cred, now())
    }

    /// Sign the request at the supplied time.
    ///
    /// Pure function of the request, the credential and the timestamp:
    /// identical inputs always produce the identical authorization value.
    /// The signature covers the exact header and query set present here, so
    /// signing must be the last step before transmission; any mutation
    /// afterwards invalidates it.
    pub fn sign_at(
        &self,
        parts: &mut http::request::Parts,
        cred: &Credential,
        now: DateTime,
    ) -> Result<()> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "account name and account key are required",
            ));
        }

        let mut ctx = SigningRequest::build(parts)?;

        let string_to_sign = string_to_sign(&mut ctx, &cred.account_name, now)?;
        let key = base64_decode(&cred.account_key).map_err(|e| {
            Error::credential_invalid("account key is not valid base64").with_source(e)
        })?;
        let signature = base64_hmac_sha256(&key, string_to_sign.as_bytes());

        ctx.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("SharedKey {}:{signature}", cred.account_name).parse()?;
            value.set_sensitive(true);

            value
        });

        ctx.apply(parts)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Encoding + "\n" +
/// Content-Language + "\n" +
/// Content-Length + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// If-Modified-Since + "\n" +
/// If-Match + "\n" +
/// If-None-Match + "\n" +
/// If-Unmodified-Since + "\n" +
/// Range + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource;
/// ```
///
/// Content-Length is signed as the empty string when the request has no
/// body, never as "0".
fn string_to_sign(ctx: &mut SigningRequest, account: &str, now: DateTime) -> Result<String> {
    let mut s = String::with_capacity(128);

    writeln!(&mut s, "{}", ctx.method.as_str())?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_ENCODING)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_LANGUAGE)?)?;
    writeln!(
        &mut s,
        "{}",
        ctx.header_get_or_default(&CONTENT_LENGTH)
            .map(|v| if v == "0" { "" } else { v })?
    )?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_MD5)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&CONTENT_TYPE)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&DATE)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_MODIFIED_SINCE)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_MATCH)?)?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&IF_NONE_MATCH)?)?;
    writeln!(
        &mut s,
        "{}",
        ctx.header_get_or_default(&IF_UNMODIFIED_SINCE)?
    )?;
    writeln!(&mut s, "{}", ctx.header_get_or_default(&RANGE)?)?;
    writeln!(&mut s, "{}", canonicalize_header(ctx, now)?)?;
    write!(&mut s, "{}", canonicalize_resource(ctx, account))?;

    debug!("string to sign: {}", &s);

    Ok(s)
}

/// ## Reference
///
/// - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
fn canonicalize_header(ctx: &mut SigningRequest, now: DateTime) -> Result<String> {
    // The date is fixed into the header set here, at signing time.
    ctx.headers
        .insert(X_MS_DATE, format_http_date(now).parse()?);

    Ok(SigningRequest::header_to_string(
        ctx.header_to_vec_with_prefix("x-ms-"),
        ":",
        "\n",
    ))
}

/// ## Reference
///
/// - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)
fn canonicalize_resource(ctx: &mut SigningRequest, account: &str) -> String {
    if ctx.query.is_empty() {
        return format!("/{}{}", account, ctx.path);
    }

    let query = ctx
        .query
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect();

    format!(
        "/{}{}\n{}",
        account,
        ctx.path,
        SigningRequest::query_to_percent_decoded_string(query, ":", "\n")
    )
}
