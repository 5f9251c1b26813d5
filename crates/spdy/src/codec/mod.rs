//! Codec for the spdy name/value header block.
//!
//! This is the transport side boundary of the crate: a [`HeaderBlock`](crate::protocol::HeaderBlock)
//! keeps one value per list entry, while on the wire repeated values of a name travel as a
//! single NUL joined string.
//!
//! - [`HeaderBlockDecoder`]: decodes a block, splitting folded values
//! - [`HeaderBlockEncoder`]: encodes a block, folding repeated values
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use micro_spdy::codec::{HeaderBlockDecoder, HeaderBlockEncoder};
//! use micro_spdy::protocol::HeaderBlock;
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! let block = HeaderBlock::try_from_fields([("status", "200"), ("set-cookie", "a=1\0b=2")]).unwrap();
//!
//! let mut buf = BytesMut::new();
//! HeaderBlockEncoder.encode(&block, &mut buf).unwrap();
//!
//! let decoded = HeaderBlockDecoder::new().decode(&mut buf).unwrap().unwrap();
//! assert_eq!(decoded.get_all("set-cookie").iter().count(), 2);
//! ```

mod header_block_decoder;
mod header_block_encoder;

pub use header_block_decoder::HeaderBlockDecoder;
pub use header_block_decoder::{MAX_HEADER_BYTES, MAX_HEADER_NUM};
pub use header_block_encoder::HeaderBlockEncoder;
