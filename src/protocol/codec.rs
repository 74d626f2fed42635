//! Wire framing for CJTP messages.
//!
//! # Responsibilities
//! - Split the inbound byte stream into one-request frames
//! - Encode responses as single delimited frames
//! - Cap frame size to bound memory per connection
//!
//! # Design Decisions
//! - Frames are newline-delimited; the JSON payload itself is unchanged
//! - `decode_eof` drains a final unterminated frame, so a legacy client
//!   that writes one burst and half-closes still gets served
//! - An oversized frame is a protocol error that closes the connection
//!
//! Interoperability note: clients that neither delimit their requests
//! nor close the stream are only served once the read-inactivity
//! timeout flushes the buffered burst (see `net::connection`).

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::protocol::response::Response;

/// Maximum frame size in bytes (64 KiB). Requests are a single JSON
/// object with short string fields; anything larger is not a CJTP peer.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 64 * 1024;

/// Error type for framing operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("frame exceeds {limit} bytes")]
    FrameTooLarge { limit: usize },
    #[error("response serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Codec for newline-delimited CJTP frames.
///
/// Decodes raw frames (JSON decoding happens upstream so that a
/// malformed envelope becomes a `4 Bad Request` response rather than a
/// connection error) and encodes [`Response`] values.
pub struct CjtpCodec {
    max_frame_size: usize,
}

impl CjtpCodec {
    /// Creates a codec with the default frame-size cap.
    pub fn new() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Creates a codec with an explicit frame-size cap.
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self { max_frame_size }
    }
}

impl Default for CjtpCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for CjtpCodec {
    type Item = BytesMut;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<BytesMut>, CodecError> {
        if let Some(pos) = src.iter().position(|&b| b == b'\n') {
            if pos > self.max_frame_size {
                return Err(CodecError::FrameTooLarge {
                    limit: self.max_frame_size,
                });
            }
            let mut frame = src.split_to(pos);
            src.advance(1);
            if frame.last() == Some(&b'\r') {
                frame.truncate(frame.len() - 1);
            }
            return Ok(Some(frame));
        }

        if src.len() > self.max_frame_size {
            return Err(CodecError::FrameTooLarge {
                limit: self.max_frame_size,
            });
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<BytesMut>, CodecError> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            // Peer closed after an unterminated burst: serve what arrived.
            None => Ok(Some(src.split())),
        }
    }
}

impl<'a> Encoder<&'a Response> for CjtpCodec {
    type Error = CodecError;

    fn encode(&mut self, response: &'a Response, dst: &mut BytesMut) -> Result<(), CodecError> {
        let json = serde_json::to_vec(response)?;
        dst.reserve(json.len() + 1);
        dst.put_slice(&json);
        dst.put_u8(b'\n');
        Ok(())
    }
}
