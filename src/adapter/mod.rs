//! Response adapter.
//!
//! Handlers written against this module return `Option<Response<T>>`
//! instead of building wire responses. [`convert`] turns such a handler
//! into the low-level [`HandlerFn`](crate::server::HandlerFn) a server
//! mounts, and [`add_handler`] does the conversion and registration in
//! one call. Routing stays with whoever supplies the mount function.

mod convert;
mod ip;
mod response;

pub use convert::{add_handler, convert, write_response};
pub use ip::{read_user_ip, X_FORWARDED_FOR, X_REAL_IP};
pub use response::{BasicResponse, Cause, ErrorResponse, Payload, Response};
