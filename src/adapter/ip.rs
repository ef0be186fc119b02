//! Client address lookup.

use crate::parser::HttpRequest;

pub const X_REAL_IP: &str = "X-Real-Ip";
pub const X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Best guess at the caller's address.
///
/// First non-empty of `X-Real-Ip`, `X-Forwarded-For`, then the raw peer
/// address. Values are returned as sent: a forwarded chain such as
/// `"5.6.7.8, 10.0.0.1"` comes back whole, and nothing is validated.
pub fn read_user_ip(request: &HttpRequest) -> String {
    [X_REAL_IP, X_FORWARDED_FOR]
        .into_iter()
        .filter_map(|name| request.get_header(name))
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| request.remote_addr.clone())
}
