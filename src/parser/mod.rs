//! HTTP parser module.
//!
//! This module parses inbound requests for the server and response heads
//! for the client side.

mod head;
mod request;
mod status;
mod method;
mod version;
mod error;
mod tests;

// Re-export public items
pub use request::HttpRequest;
pub use status::ResponseHead;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parsing entry points
pub use head::{declared_body_length, find_head_end};
pub(crate) use head::header_value;
pub use request::parse_request;
pub use status::parse_response_head;
