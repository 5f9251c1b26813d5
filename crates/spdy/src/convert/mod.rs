//! Translation between spdy header blocks and http messages.
//!
//! - [`ResponseTranslator`]: received [`HeaderBlock`](crate::protocol::HeaderBlock) to
//!   [`ResponseInfo`](crate::protocol::ResponseInfo)
//! - [`RequestTranslator`]: outbound [`RequestInfo`](crate::protocol::RequestInfo) to
//!   [`HeaderBlock`](crate::protocol::HeaderBlock)
//!
//! Both are stateless; a single instance can be shared between threads.

mod request_translator;
mod response_translator;

pub use request_translator::RequestTranslator;
pub use response_translator::ResponseTranslator;
