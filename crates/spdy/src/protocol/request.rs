//! Outbound http request description.
//!
//! [`RequestInfo`] carries everything the spdy request translation looks at: the
//! method, target url, optional referrer, caller supplied headers, the upload size
//! when a body exists, and the [`LoadFlags`] controlling cache related headers.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri};

/// Load flags for a request, a bitset.
///
/// Only [`LoadFlags::BYPASS_CACHE`] and [`LoadFlags::VALIDATE_CACHE`] change the spdy
/// header block, the rest are carried for the cache layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LoadFlags(u32);

impl LoadFlags {
    pub const NORMAL: Self = Self(0);
    /// Revalidate cached entries with the origin (and with intermediate caches).
    pub const VALIDATE_CACHE: Self = Self(1 << 0);
    /// Skip every cache, including intermediate ones.
    pub const BYPASS_CACHE: Self = Self(1 << 1);
    pub const PREFERRING_CACHE: Self = Self(1 << 2);
    pub const ONLY_FROM_CACHE: Self = Self(1 << 3);
    pub const DISABLE_CACHE: Self = Self(1 << 4);

    pub const fn empty() -> Self {
        Self::NORMAL
    }

    pub const fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for LoadFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LoadFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LoadFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Represents an outbound http request before it is turned into a spdy header block.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    method: Method,
    url: Uri,
    referrer: Option<Uri>,
    extra_headers: HeaderMap,
    upload_content_length: Option<u64>,
    load_flags: LoadFlags,
}

impl RequestInfo {
    pub fn new(method: Method, url: Uri) -> Self {
        Self {
            method,
            url,
            referrer: None,
            extra_headers: HeaderMap::new(),
            upload_content_length: None,
            load_flags: LoadFlags::NORMAL,
        }
    }

    /// Sets the referrer; without one no `referer` header is sent.
    #[must_use]
    pub fn with_referrer(mut self, referrer: Uri) -> Self {
        self.referrer = Some(referrer);
        self
    }

    #[must_use]
    pub fn with_extra_headers(mut self, extra_headers: HeaderMap) -> Self {
        self.extra_headers = extra_headers;
        self
    }

    /// Marks the request as having an upload body of `length` bytes.
    #[must_use]
    pub fn with_upload_content_length(mut self, length: u64) -> Self {
        self.upload_content_length = Some(length);
        self
    }

    #[must_use]
    pub fn with_load_flags(mut self, load_flags: LoadFlags) -> Self {
        self.load_flags = load_flags;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Uri {
        &self.url
    }

    pub fn referrer(&self) -> Option<&Uri> {
        self.referrer.as_ref()
    }

    /// Headers supplied by the caller, may hold several values per name.
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    pub fn extra_headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.extra_headers
    }

    /// Present only when the request has a body.
    pub fn upload_content_length(&self) -> Option<u64> {
        self.upload_content_length
    }

    pub fn load_flags(&self) -> LoadFlags {
        self.load_flags
    }
}

/// Takes method, uri and headers from request parts; no referrer, upload or load flags.
impl From<Parts> for RequestInfo {
    fn from(parts: Parts) -> Self {
        Self::new(parts.method, parts.uri).with_extra_headers(parts.headers)
    }
}

impl From<Request<()>> for RequestInfo {
    #[inline]
    fn from(request: Request<()>) -> Self {
        request.into_parts().0.into()
    }
}
