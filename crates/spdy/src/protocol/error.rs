use std::io;

use http::HeaderName;
use thiserror::Error;

/// Umbrella error for callers that both frame and translate header blocks.
#[derive(Debug, Error)]
pub enum SpdyError {
    #[error("header block decode error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("header block encode error: {source}")]
    Send {
        #[from]
        source: SendError,
    },

    #[error("header translation error: {source}")]
    Convert {
        #[from]
        source: ConvertError,
    },
}

/// Failure to turn a spdy header block into an http response.
///
/// The caller should treat this as a malformed response and abort only the
/// exchange it belongs to.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("spdy header block without {name} header")]
    MissingRequiredField { name: HeaderName },
}

impl ConvertError {
    pub fn missing_required_field(name: HeaderName) -> Self {
        Self::MissingRequiredField { name }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header block size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid http status: {reason}")]
    InvalidStatus { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_status<S: ToString>(str: S) -> Self {
        Self::InvalidStatus { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
