//! Decoder for the spdy name/value header block carried by SYN_STREAM, SYN_REPLY and
//! HEADERS frames, after the frame layer has removed compression.
//!
//! # Format
//!
//! ```text
//! +------------------------------------+
//! | Number of Name/Value pairs (16)    |
//! +------------------------------------+
//! |     Length of name (16)            |
//! +------------------------------------+
//! |           Name (string)            |
//! +------------------------------------+
//! |     Length of value (16)           |
//! +------------------------------------+
//! |          Value (string)            |   multiple values joined by NUL
//! +------------------------------------+
//! |           (repeats)                |
//! ```
//!
//! All numbers are big endian. The decoder waits until the whole block is buffered, records
//! the byte ranges of every name and value, and then builds the [`HeaderBlock`] from slices
//! of a single frozen buffer.

use bytes::{Buf, BytesMut};
use http::HeaderName;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{HeaderBlock, ParseError};

/// Default maximum number of name/value pairs in a block
pub const MAX_HEADER_NUM: usize = 128;

/// Default maximum size in bytes of an encoded block
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

/// Size of the pair count and of every length prefix
pub(crate) const LENGTH_SIZE: usize = 2;

/// Decoder for spdy header blocks implementing the [`Decoder`] trait.
///
/// Names are normalized to lowercase. A name that appears twice, after normalization, is
/// rejected: the transport must fold repeated values into a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBlockDecoder {
    max_header_num: usize,
    max_header_bytes: usize,
}

impl HeaderBlockDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of name/value pairs a block may declare.
    #[must_use]
    pub fn with_max_headers(mut self, max_header_num: usize) -> Self {
        self.max_header_num = max_header_num;
        self
    }

    /// Limits the encoded size of a block.
    #[must_use]
    pub fn with_max_bytes(mut self, max_header_bytes: usize) -> Self {
        self.max_header_bytes = max_header_bytes;
        self
    }

    pub fn max_header_num(&self) -> usize {
        self.max_header_num
    }

    pub fn max_header_bytes(&self) -> usize {
        self.max_header_bytes
    }

    /// Reads the length prefixed string at `offset`, returning its byte range and moving
    /// `offset` past it. `Ok(None)` means more data is needed.
    fn next_range(&self, src: &[u8], offset: &mut usize) -> Result<Option<(usize, usize)>, ParseError> {
        let Some(mut length_bytes) = src.get(*offset..*offset + LENGTH_SIZE) else {
            return Ok(None);
        };

        let start = *offset + LENGTH_SIZE;
        let end = start + usize::from(length_bytes.get_u16());
        ensure!(end <= self.max_header_bytes, ParseError::too_large_header(end, self.max_header_bytes));

        if end > src.len() {
            return Ok(None);
        }

        *offset = end;
        Ok(Some((start, end)))
    }
}

impl Default for HeaderBlockDecoder {
    fn default() -> Self {
        Self { max_header_num: MAX_HEADER_NUM, max_header_bytes: MAX_HEADER_BYTES }
    }
}

impl Decoder for HeaderBlockDecoder {
    type Item = HeaderBlock;
    type Error = ParseError;

    /// Attempts to decode one header block from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(block))` if a complete block was decoded, its bytes are consumed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if decoding failed
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The pair count exceeds the configured maximum
    /// - The block size exceeds the configured maximum
    /// - A name is empty, invalid, or repeated
    /// - A value contains bytes not allowed in a header value
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(mut count_bytes) = src.get(..LENGTH_SIZE) else {
            return Ok(None);
        };

        let header_count = usize::from(count_bytes.get_u16());
        ensure!(header_count <= self.max_header_num, ParseError::too_many_headers(self.max_header_num));

        // Record byte ranges first so nothing is consumed until the block is complete
        let mut offset = LENGTH_SIZE;
        let mut indices = Vec::with_capacity(header_count);
        for _ in 0..header_count {
            let Some(name) = self.next_range(src, &mut offset)? else {
                return Ok(None);
            };
            let Some(value) = self.next_range(src, &mut offset)? else {
                return Ok(None);
            };
            indices.push(HeaderIndex { name, value });
        }

        trace!(header_count, block_size = offset, "parsed spdy header block");

        let block_bytes = src.split_to(offset).freeze();
        let mut block = HeaderBlock::with_capacity(header_count);
        for index in indices {
            let raw_name = &block_bytes[index.name.0..index.name.1];
            let name = HeaderName::from_bytes(raw_name)
                .map_err(|_| ParseError::invalid_header(format!("invalid header name {:?}", String::from_utf8_lossy(raw_name))))?;

            ensure!(!block.contains_key(&name), ParseError::invalid_header(format!("duplicate header name {name}")));

            block.append_folded(name, block_bytes.slice(index.value.0..index.value.1))?;
        }

        Ok(Some(block))
    }
}

/// Byte ranges of a name and its value within the block buffer.
#[derive(Debug, Clone, Copy)]
struct HeaderIndex {
    name: (usize, usize),
    value: (usize, usize),
}
