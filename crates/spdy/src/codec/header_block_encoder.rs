//! Encoder writing a [`HeaderBlock`] in the spdy name/value block format.
//!
//! Each distinct name is written once; a name with several values has them joined by
//! [`SEPARATOR`](crate::protocol::SEPARATOR), the inverse of what
//! [`HeaderBlockDecoder`](super::HeaderBlockDecoder) does.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::codec::header_block_decoder::LENGTH_SIZE;
use crate::protocol::{HeaderBlock, SendError};

/// Encoder for spdy header blocks implementing the [`Encoder`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderBlockEncoder;

impl Encoder<&HeaderBlock> for HeaderBlockEncoder {
    type Error = SendError;

    /// Encodes `block` into the destination buffer.
    ///
    /// # Errors
    ///
    /// Returns `SendError::InvalidHeader` if the block has more than `u16::MAX` names, or
    /// a name or folded value is longer than `u16::MAX` bytes. Nothing is written then.
    fn encode(&mut self, block: &HeaderBlock, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let header_count = u16::try_from(block.len()).map_err(|_| {
            error!(header_count = block.len(), "too many headers for a spdy header block");
            SendError::invalid_header(format!("{} header names exceed the block limit", block.len()))
        })?;

        let mut encoded = BytesMut::with_capacity(encoded_capacity(block));
        encoded.put_u16(header_count);
        for (name, value) in block.fields() {
            put_length_prefixed(&mut encoded, name.as_str().as_bytes())?;
            put_length_prefixed(&mut encoded, &value).inspect_err(|_| {
                error!(header = %name, value_size = value.len(), "header value too large for a spdy header block");
            })?;
        }

        dst.unsplit(encoded);
        Ok(())
    }
}

impl Encoder<HeaderBlock> for HeaderBlockEncoder {
    type Error = SendError;

    fn encode(&mut self, block: HeaderBlock, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Encoder::<&HeaderBlock>::encode(self, &block, dst)
    }
}

fn put_length_prefixed(dst: &mut BytesMut, bytes: &[u8]) -> Result<(), SendError> {
    let length = u16::try_from(bytes.len()).map_err(|_| SendError::invalid_header(format!("field of {} bytes exceeds the length limit", bytes.len())))?;
    dst.put_u16(length);
    dst.put_slice(bytes);
    Ok(())
}

fn encoded_capacity(block: &HeaderBlock) -> usize {
    LENGTH_SIZE + block.iter().map(|(name, value)| 2 * LENGTH_SIZE + name.as_str().len() + value.len() + 1).sum::<usize>()
}
