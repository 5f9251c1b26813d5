//! Core types shared by the translators and the header block codec.
//!
//! - **Header blocks** ([`header_block`]): the spdy side of a translation
//!   - [`HeaderBlock`]: lowercase names mapped to ordered value lists
//!   - [`SEPARATOR`]: the NUL byte joining folded values on the wire
//!   - [`STATUS`], [`VERSION`], [`METHOD`], [`URL`], [`HOST`], [`SCHEME`]: the names
//!     spdy uses for what http/1.1 carries in its start line
//!
//! - **Requests** ([`request`]): [`RequestInfo`] and its [`LoadFlags`]
//!
//! - **Responses** ([`response`]): [`ResponseInfo`] holding the raw header blob,
//!   parseable into a [`ResponseHead`]
//!
//! - **Errors** ([`error`]): [`ConvertError`], [`ParseError`], [`SendError`] and the
//!   umbrella [`SpdyError`]

mod header_block;
pub use header_block::HeaderBlock;
pub use header_block::SEPARATOR;
pub use header_block::split_values;
pub use header_block::{HOST, METHOD, SCHEME, STATUS, URL, VERSION};

mod request;
pub use request::LoadFlags;
pub use request::RequestInfo;

mod response;
pub use response::ResponseHead;
pub use response::ResponseInfo;

mod error;
pub use error::ConvertError;
pub use error::ParseError;
pub use error::SendError;
pub use error::SpdyError;
