//! OAuth 1.0a request signing (HMAC-SHA1) for user-context Twitter calls.

use base64::Engine;
use hmac::{Hmac, Mac};
use reqwest::{Method, Url};
use sha1::Sha1;

use crate::HttpError;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha1 = Hmac<Sha1>;

/// Consumer and access-token credentials for user-context requests.
#[derive(Clone)]
pub struct OAuth1Keys {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl std::fmt::Debug for OAuth1Keys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Keys")
            .field("consumer_key", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Build the `Authorization: OAuth ...` header value for one request.
///
/// `params` are the query (or form) parameters that will be sent; any query
/// already present on `url` is included as well.
pub fn authorization_header(
    keys: &OAuth1Keys,
    method: &Method,
    url: &Url,
    params: &[(&str, &str)],
) -> Result<String, HttpError> {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string();
    header_with(keys, method, url, params, &nonce, &timestamp)
}

fn header_with(
    keys: &OAuth1Keys,
    method: &Method,
    url: &Url,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> Result<String, HttpError> {
    let mut oauth = vec![
        ("oauth_consumer_key", keys.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", keys.token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut all: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    all.extend(params.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    all.extend(oauth.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    let signature = sign(keys, method, url, &all)?;
    oauth.push(("oauth_signature", signature.as_str()));
    oauth.sort_by(|a, b| a.0.cmp(b.0));

    let fields = oauth
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", enc(k), enc(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {fields}"))
}

/// HMAC-SHA1 signature over the RFC 5849 signature base string.
fn sign(
    keys: &OAuth1Keys,
    method: &Method,
    url: &Url,
    params: &[(String, String)],
) -> Result<String, HttpError> {
    let base = signature_base_string(method, url, params);
    let key = format!("{}&{}", enc(&keys.consumer_secret), enc(&keys.token_secret));

    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| HttpError::Build(format!("oauth signing key: {e}")))?;
    mac.update(base.as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn signature_base_string(method: &Method, url: &Url, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> =
        params.iter().map(|(k, v)| (enc(k), enc(v))).collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.as_str().to_ascii_uppercase(),
        enc(&base_url(url)),
        enc(&param_string)
    )
}

/// Scheme, authority and path; no query or fragment.
fn base_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    match url.port() {
        Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, url.path()),
        None => format!("{}://{}{}", url.scheme(), host, url.path()),
    }
}

/// RFC 3986 percent-encoding: everything but `A-Za-z0-9-._~`.
fn enc(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
