//! Translation of http semantics between spdy header blocks and http messages
//!
//! A spdy stream carries its headers as a flat block of lowercase `name -> value` pairs,
//! with repeated values of a name joined by a NUL byte and the request and status lines
//! spread over ordinary entries (`method`, `url`, `status`, `version`, ...). This crate
//! converts between that representation and the conventional http message model:
//!
//! - received header blocks become [`protocol::ResponseInfo`], holding the raw header blob
//!   a generic http header parser expects
//! - outbound requests described by [`protocol::RequestInfo`] become header blocks
//!
//! # Example
//!
//! ```
//! use http::{Method, StatusCode, Uri};
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use micro_spdy::convert::{RequestTranslator, ResponseTranslator};
//! use micro_spdy::protocol::{HeaderBlock, LoadFlags, RequestInfo};
//!
//! // Initialize logging
//! let subscriber = FmtSubscriber::builder()
//!     .with_max_level(Level::TRACE)
//!     .finish();
//! tracing::subscriber::set_global_default(subscriber)
//!     .expect("setting default subscriber failed");
//!
//! // Outbound: request -> header block
//! let request = RequestInfo::new(Method::GET, Uri::from_static("https://example.com/index.html?lang=en"))
//!     .with_load_flags(LoadFlags::VALIDATE_CACHE);
//! let headers = RequestTranslator.translate(&request, true);
//! assert_eq!(headers.get("url").unwrap(), "/index.html?lang=en");
//! assert_eq!(headers.get("cache-control").unwrap(), "max-age=0");
//!
//! // Inbound: header block -> response
//! let reply = HeaderBlock::try_from_fields([
//!     ("status", "200 OK"),
//!     ("version", "HTTP/1.1"),
//!     ("set-cookie", "a=1\0b=2"),
//! ])
//! .unwrap();
//!
//! let response = match ResponseTranslator.translate(&reply) {
//!     Ok(response) => response,
//!     Err(e) => {
//!         info!(cause = %e, "malformed spdy reply");
//!         return;
//!     }
//! };
//!
//! let head = response.head().unwrap();
//! assert_eq!(head.status(), StatusCode::OK);
//! assert_eq!(head.headers().get_all("set-cookie").iter().count(), 2);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`protocol`]: header blocks, request/response descriptions and error types
//! - [`convert`]: the two translators
//! - [`codec`]: encoding and decoding of header blocks on the transport side
//!
//! # Multi-valued headers
//!
//! Inside the crate a [`protocol::HeaderBlock`] keeps an ordered list of values per name.
//! NUL joining and splitting only happens at the boundaries: the [`codec`] folds and splits
//! for the transport, and the response translation emits one `name:value` line per value.
//!
//! # Error Handling
//!
//! - [`protocol::ConvertError`]: a response header block without `status` or `version`
//! - [`protocol::ParseError`]: decoding errors of header blocks and raw header blobs
//! - [`protocol::SendError`]: encoding errors of header blocks
//! - [`protocol::SpdyError`]: all of the above
//!
//! Request translation never fails.

pub mod codec;
pub mod convert;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use futures::{SinkExt, StreamExt};
    use http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
    use tokio_util::codec::{FramedRead, FramedWrite};

    use crate::codec::{HeaderBlockDecoder, HeaderBlockEncoder};
    use crate::convert::{RequestTranslator, ResponseTranslator};
    use crate::protocol::{ConvertError, HeaderBlock, RequestInfo, SpdyError, split_values};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn types_are_thread_safe() {
        assert_send_sync::<HeaderBlock>();
        assert_send_sync::<RequestInfo>();
        assert_send_sync::<crate::protocol::ResponseInfo>();
        assert_send_sync::<RequestTranslator>();
        assert_send_sync::<ResponseTranslator>();
        assert_send_sync::<SpdyError>();
    }

    #[test]
    fn translators_shared_between_threads() {
        let translator = Arc::new(ResponseTranslator);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let translator = Arc::clone(&translator);
                thread::spawn(move || {
                    let status = format!("{}", 200 + i);
                    let block = HeaderBlock::try_from_fields([("status", status.as_str()), ("version", "HTTP/1.1")]).unwrap();
                    translator.translate(&block).unwrap().head().unwrap().status()
                })
            })
            .collect();

        let statuses: Vec<StatusCode> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
        assert_eq!(statuses.iter().map(StatusCode::as_u16).collect::<Vec<_>>(), vec![200, 201, 202, 203]);
    }

    #[test]
    fn request_folding_round_trips_through_response_splitting() {
        let mut extra = HeaderMap::new();
        extra.append("cookie", HeaderValue::from_static("a=1"));
        extra.append("cookie", HeaderValue::from_static("b=2"));

        let request = RequestInfo::new(Method::GET, Uri::from_static("http://example.com/")).with_extra_headers(extra);
        let folded = RequestTranslator.translate(&request, true).folded("cookie").unwrap();

        let split: Vec<&[u8]> = split_values(&folded).collect();
        assert_eq!(split, vec![&b"a=1"[..], &b"b=2"[..]]);

        // the same folded value as a response header yields one line per value
        let fields: [(&str, &[u8]); 3] = [("status", b"200"), ("version", b"HTTP/1.1"), ("set-cookie", &folded)];
        let reply = HeaderBlock::try_from_fields(fields).unwrap();
        let response = ResponseTranslator.translate(&reply).unwrap();
        let cookies: Vec<&[u8]> = response.lines().filter(|line| line.starts_with(b"set-cookie:")).collect();
        assert_eq!(cookies, vec![&b"set-cookie:a=1"[..], &b"set-cookie:b=2"[..]]);
    }

    fn read_reply(block: &HeaderBlock) -> Result<StatusCode, SpdyError> {
        let response = ResponseTranslator.translate(block)?;
        Ok(response.head()?.status())
    }

    #[tokio::test]
    async fn framed_request_and_reply() {
        let request = RequestInfo::new(Method::POST, Uri::from_static("http://example.com:8080/submit")).with_upload_content_length(12);
        let reply = HeaderBlock::try_from_fields([("status", "201 Created"), ("version", "HTTP/1.1"), ("location", "/submit/1")]).unwrap();
        let broken = HeaderBlock::try_from_fields([("version", "HTTP/1.1")]).unwrap();

        let mut writer = FramedWrite::new(Vec::<u8>::new(), HeaderBlockEncoder);
        writer.send(RequestTranslator.translate(&request, false)).await.unwrap();
        writer.send(reply).await.unwrap();
        writer.send(broken).await.unwrap();
        let wire = writer.into_inner();

        let mut reader = FramedRead::new(&wire[..], HeaderBlockDecoder::new());

        let sent = reader.next().await.unwrap().unwrap();
        assert_eq!(sent.get("url").unwrap(), "http://example.com:8080/submit");
        assert_eq!(sent.get("host").unwrap(), "example.com:8080");
        assert_eq!(sent.get("content-length").unwrap(), "12");

        let received = reader.next().await.unwrap().unwrap();
        assert_eq!(read_reply(&received).unwrap(), StatusCode::CREATED);

        let received = reader.next().await.unwrap().unwrap();
        let err = read_reply(&received).unwrap_err();
        assert!(matches!(err, SpdyError::Convert { source: ConvertError::MissingRequiredField { .. } }));

        assert!(reader.next().await.is_none());
    }

    #[tokio::test]
    async fn framed_read_reports_truncated_block() {
        let block = HeaderBlock::try_from_fields([("status", "200"), ("version", "HTTP/1.1")]).unwrap();

        let mut writer = FramedWrite::new(Vec::<u8>::new(), HeaderBlockEncoder);
        writer.send(block).await.unwrap();
        let wire = writer.into_inner();

        let mut reader = FramedRead::new(&wire[..wire.len() - 1], HeaderBlockDecoder::new());
        let result = reader.next().await.unwrap();
        assert!(result.is_err());
    }
}
