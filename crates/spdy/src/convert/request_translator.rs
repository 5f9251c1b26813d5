//! Translation of an outbound http request into a spdy header block.
//!
//! The caller supplied headers go in first, then the fields the transport requires
//! (`method`, `url`, `host`, `scheme`, `version`) and the conditional ones
//! (`content-length`, `referer`, `pragma`, `cache-control`). The later fields replace
//! anything the caller set under the same name.

use http::header::{CACHE_CONTROL, CONTENT_LENGTH, PRAGMA, REFERER};
use http::{HeaderName, HeaderValue, Method, Uri};
use tracing::{trace, warn};

use crate::protocol::{HOST, HeaderBlock, LoadFlags, METHOD, RequestInfo, SCHEME, URL, VERSION};

const HTTP_11: HeaderValue = HeaderValue::from_static("HTTP/1.1");
const ZERO_VALUE: HeaderValue = HeaderValue::from_static("0");
const NO_CACHE: HeaderValue = HeaderValue::from_static("no-cache");
const MAX_AGE_ZERO: HeaderValue = HeaderValue::from_static("max-age=0");

/// Builds the spdy header block for an outbound request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTranslator;

impl RequestTranslator {
    /// Translates `request` into a spdy header block.
    ///
    /// `direct` is true when the stream goes straight to the origin server, in which case
    /// `url` only carries the path and query. Through a proxy it carries the absolute url.
    ///
    /// Never fails: absent optional fields just leave out the matching header.
    pub fn translate(&self, request: &RequestInfo, direct: bool) -> HeaderBlock {
        let extra_headers = request.extra_headers();
        let mut headers = HeaderBlock::with_capacity(extra_headers.keys_len() + 10);

        // repeated names keep all their values, folded only when the block is encoded
        for (name, value) in extra_headers {
            headers.append(name.clone(), value.clone());
        }

        insert_text(&mut headers, METHOD, request.method().as_str());

        match request.upload_content_length() {
            Some(length) => headers.insert(CONTENT_LENGTH, HeaderValue::from(length)),
            // an empty POST or PUT still needs a length; browsers send one for HEAD as well
            None if needs_zero_length(request.method()) => headers.insert(CONTENT_LENGTH, ZERO_VALUE),
            None => {}
        }

        let url = request.url();
        let request_url = if direct { path_for_request(url) } else { spec_for_request(url) };
        insert_text(&mut headers, URL, &request_url);
        insert_text(&mut headers, HOST, &host_and_optional_port(url));
        insert_text(&mut headers, SCHEME, url.scheme_str().unwrap_or_default());
        headers.insert(VERSION, HTTP_11);

        if let Some(referrer) = request.referrer() {
            insert_text(&mut headers, REFERER, &referrer.to_string());
        }

        // load flags that matter to intermediate caches
        let load_flags = request.load_flags();
        if load_flags.contains(LoadFlags::BYPASS_CACHE) {
            headers.insert(PRAGMA, NO_CACHE);
            headers.insert(CACHE_CONTROL, NO_CACHE);
        } else if load_flags.contains(LoadFlags::VALIDATE_CACHE) {
            headers.insert(CACHE_CONTROL, MAX_AGE_ZERO);
        }

        trace!(method = %request.method(), direct, header_count = headers.len(), "built spdy header block from http request");
        headers
    }
}

fn needs_zero_length(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::HEAD
}

fn insert_text(headers: &mut HeaderBlock, name: HeaderName, text: &str) {
    match HeaderValue::from_str(text) {
        Ok(value) => headers.insert(name, value),
        Err(e) => warn!(header = %name, cause = %e, "dropping header that can't be carried in a spdy header block"),
    }
}

/// Path and query of `url`, `/` when the path is empty.
fn path_for_request(url: &Uri) -> String {
    let path = match url.path() {
        "" => "/",
        path => path,
    };
    match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

/// Absolute form of `url` as sent to a proxy, without credentials.
///
/// Falls back to the path form when `url` has no scheme or host.
fn spec_for_request(url: &Uri) -> String {
    match (url.scheme_str(), url.host()) {
        (Some(scheme), Some(_)) => format!("{scheme}://{}{}", host_and_optional_port(url), path_for_request(url)),
        _ => path_for_request(url),
    }
}

fn host_and_optional_port(url: &Uri) -> String {
    let host = url.host().unwrap_or_default();
    match url.port_u16() {
        Some(port) if Some(port) != default_port(url.scheme_str()) => format!("{host}:{port}"),
        _ => host.to_string(),
    }
}

fn default_port(scheme: Option<&str>) -> Option<u16> {
    match scheme? {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        "ftp" => Some(21),
        _ => None,
    }
}
