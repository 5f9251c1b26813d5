//! The spdy header block.
//!
//! On the wire a spdy header block is a flat `name -> value` mapping in which a single
//! value may carry several logical values joined by a NUL byte. Inside this crate the
//! block keeps an explicit ordered list of values per name instead, and the NUL joining
//! and splitting only happens at the boundaries:
//!
//! - [`HeaderBlock::append_folded`] and [`HeaderBlock::try_from_fields`] split values
//!   coming from the transport
//! - [`HeaderBlock::folded`] and [`HeaderBlock::fields`] join them again for the transport
//!
//! Names are `http::HeaderName`, so they are lowercase by construction, and values are
//! `http::HeaderValue`, which can never contain the separator.

use bytes::{BufMut, Bytes, BytesMut};
use http::header::{AsHeaderName, GetAll, Iter};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::protocol::ParseError;

/// The reserved byte joining multiple values of one header, and terminating each
/// entry of a raw response header blob.
pub const SEPARATOR: u8 = b'\0';

/// Required in every spdy response, carries the status code and optional reason.
pub const STATUS: HeaderName = HeaderName::from_static("status");
/// Required in every spdy response, carries the http version (e.g. `HTTP/1.1`).
pub const VERSION: HeaderName = HeaderName::from_static("version");
pub const METHOD: HeaderName = HeaderName::from_static("method");
pub const URL: HeaderName = HeaderName::from_static("url");
pub const HOST: HeaderName = HeaderName::from_static("host");
pub const SCHEME: HeaderName = HeaderName::from_static("scheme");

/// A spdy header block: lowercase header names mapped to an ordered list of values.
///
/// Iteration is deterministic: names come in the order they were first inserted and
/// the values of each name in the order they were appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    inner: HeaderMap,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { inner: HeaderMap::with_capacity(capacity) }
    }

    /// Builds a block from raw transport fields.
    ///
    /// Names are normalized to lowercase and every value is split on [`SEPARATOR`].
    /// A name that shows up more than once gets the values of all occurrences.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeader`] when a name is not a valid header name or
    /// a value segment contains bytes not allowed in a header value.
    pub fn try_from_fields<I, N, V>(fields: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut block = Self::new();
        for (name, value) in fields {
            let name = HeaderName::from_bytes(name.as_ref()).map_err(|e| ParseError::invalid_header(format!("header name: {e}")))?;
            block.append_folded(name, Bytes::copy_from_slice(value.as_ref()))?;
        }
        Ok(block)
    }

    /// Appends every value of a folded transport value to `name`.
    ///
    /// Empty segments are kept: `"a\0"` yields `"a"` and `""`, and an empty value yields
    /// a single empty value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeader`] when a segment is not a valid header value.
    /// The block is left untouched in that case.
    pub fn append_folded(&mut self, name: HeaderName, folded: Bytes) -> Result<(), ParseError> {
        let values = split_values(&folded)
            .map(|segment| HeaderValue::from_maybe_shared(folded.slice_ref(segment)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::invalid_header(format!("value of {name}: {e}")))?;

        for value in values {
            self.inner.append(name.clone(), value);
        }
        Ok(())
    }

    /// Adds one more value to `name`, keeping the values already present.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.append(name, value);
    }

    /// Sets `name` to exactly `value`, dropping any previous values.
    pub fn insert(&mut self, name: HeaderName, value: HeaderValue) {
        self.inner.insert(name, value);
    }

    /// Removes every value of `name`, returning the first one.
    pub fn remove<K: AsHeaderName>(&mut self, name: K) -> Option<HeaderValue> {
        self.inner.remove(name)
    }

    /// Returns the first value of `name`.
    pub fn get<K: AsHeaderName>(&self, name: K) -> Option<&HeaderValue> {
        self.inner.get(name)
    }

    pub fn get_all<K: AsHeaderName>(&self, name: K) -> GetAll<'_, HeaderValue> {
        self.inner.get_all(name)
    }

    pub fn contains_key<K: AsHeaderName>(&self, name: K) -> bool {
        self.inner.contains_key(name)
    }

    /// Returns the values of `name` joined by [`SEPARATOR`], the form the transport carries.
    pub fn folded<K: AsHeaderName>(&self, name: K) -> Option<Bytes> {
        let values = self.inner.get_all(name);
        if values.iter().next().is_none() {
            return None;
        }
        Some(fold_values(&values))
    }

    /// Iterates distinct names with their folded values.
    pub fn fields(&self) -> impl Iterator<Item = (&HeaderName, Bytes)> + '_ {
        self.inner.keys().map(|name| (name, fold_values(&self.inner.get_all(name))))
    }

    /// Iterates every `(name, value)` pair, a name repeating once per value.
    pub fn iter(&self) -> Iter<'_, HeaderValue> {
        self.inner.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &HeaderName> + '_ {
        self.inner.keys()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.inner.keys_len()
    }

    /// Number of values, counting each value of a multi-valued name.
    pub fn values_len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_inner(self) -> HeaderMap {
        self.inner
    }
}

/// Splits a folded value on [`SEPARATOR`], keeping empty segments.
pub fn split_values(folded: &[u8]) -> impl Iterator<Item = &[u8]> {
    folded.split(|byte| *byte == SEPARATOR)
}

fn fold_values(values: &GetAll<'_, HeaderValue>) -> Bytes {
    let mut folded = BytesMut::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            folded.put_u8(SEPARATOR);
        }
        folded.put_slice(value.as_bytes());
    }
    folded.freeze()
}

impl AsRef<HeaderMap> for HeaderBlock {
    fn as_ref(&self) -> &HeaderMap {
        &self.inner
    }
}

impl From<HeaderMap> for HeaderBlock {
    #[inline]
    fn from(inner: HeaderMap) -> Self {
        Self { inner }
    }
}

impl FromIterator<(HeaderName, HeaderValue)> for HeaderBlock {
    fn from_iter<T: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: T) -> Self {
        let mut block = Self::new();
        for (name, value) in iter {
            block.append(name, value);
        }
        block
    }
}

impl<'a> IntoIterator for &'a HeaderBlock {
    type Item = (&'a HeaderName, &'a HeaderValue);
    type IntoIter = Iter<'a, HeaderValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
