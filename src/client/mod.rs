//! Client side of the adapter.
//!
//! [`extract_payload`] turns a response written by an adapted handler back
//! into a typed value or an error. [`Client`] and [`read_response`] exist
//! to obtain such responses over a plain TCP connection.

mod error;
mod response;
mod extract;
mod http_client;

// Re-export public items
pub use error::Error;
pub use response::{read_response, ClientResponse, ResponseBody};
pub use extract::{decode_payload, extract_payload};
pub use http_client::Client;
