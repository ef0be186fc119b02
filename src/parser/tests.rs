//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde::Deserialize;

    use crate::parser::{
        declared_body_length, find_head_end, parse_request, parse_response_head, Error, HttpRequest,
        HttpVersion, Method,
    };

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.path, "/users");
        assert_eq!(result.version, HttpVersion::Http11);
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert!(result.body.is_empty());
        assert!(result.remote_addr.is_empty());
    }

    #[test]
    fn test_missing_host_header() {
        let request = b"GET /users HTTP/1.1\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MissingHeader(ref h)) if h == "Host"));
    }

    #[test]
    fn test_lowercase_host_header_satisfies_http11() {
        let request = b"GET /users HTTP/1.1\r\nhost: example.com\r\n\r\n";
        assert!(parse_request(request).is_ok());
    }

    #[test]
    fn test_invalid_method() {
        let request = b"BREW /pot HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidMethod(ref m)) if m == "BREW"));
    }

    #[test]
    fn test_invalid_http_version() {
        let request = b"GET /users HTTP/9.9\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "HTTP/9.9"));
    }

    #[test]
    fn test_invalid_header_format() {
        let request = b"GET /users HTTP/1.1\r\nNoColonHere\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::InvalidHeaderFormat)));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(parse_request(b""), Err(Error::EmptyRequest)));
        assert!(matches!(parse_request(b"\r\n\r\n"), Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_incomplete_request_line() {
        let result = parse_request(b"GET\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_malformed_utf8_in_head() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\r\nX-Test: \xFF\xFF\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref s)) if s == "Invalid UTF-8"));
    }

    #[test]
    fn test_mixed_line_endings() {
        let request = b"GET /users HTTP/1.1\r\nHost: example.com\nX-Real-Ip: 1.2.3.4\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("X-Real-Ip").unwrap(), "1.2.3.4");
    }

    #[test]
    fn test_header_values_are_trimmed_and_duplicates_replace() {
        let request = b"GET /users HTTP/1.1\r\nHost:  example.com  \r\nX-Forwarded-For: 1.1.1.1\r\nX-Forwarded-For: 5.6.7.8, 9.9.9.9\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.get("Host").unwrap(), "example.com");
        assert_eq!(result.headers.get("X-Forwarded-For").unwrap(), "5.6.7.8, 9.9.9.9");
    }

    #[test]
    fn test_body_is_captured() {
        let request = b"POST /users HTTP/1.1\r\n\
            Host: example.com\r\n\
            Content-Type: application/json\r\n\
            Content-Length: 16\r\n\
            \r\n\
            {\"name\":\"Alice\"}";

        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::POST);
        assert_eq!(result.body, b"{\"name\":\"Alice\"}".to_vec());
    }

    #[test]
    fn test_body_is_cut_to_content_length() {
        let request = b"POST /users HTTP/1.1\r\nHost: example.com\r\nContent-Length: 2\r\n\r\nokEXTRA";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"ok".to_vec());
    }

    #[test]
    fn test_body_shorter_than_content_length() {
        let request = b"POST /users HTTP/1.1\r\nHost: example.com\r\nContent-Length: 16\r\n\r\n";
        let result = parse_request(request);
        assert!(matches!(result, Err(Error::IncompleteBody { declared: 16, received: 0 })));
    }

    #[test]
    fn test_declared_body_length() {
        assert_eq!(declared_body_length(b"POST / HTTP/1.1\r\ncontent-length: 12\r\n\r\n"), 12);
        assert_eq!(declared_body_length(b"POST / HTTP/1.1\nContent-Length: 3\nContent-Length: 5\n\n"), 5);
        assert_eq!(declared_body_length(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n"), 0);
        assert_eq!(declared_body_length(b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\n"), 0);
    }

    #[test]
    fn test_body_without_content_length_takes_everything() {
        let request = b"POST /users HTTP/1.0\n\nraw body";
        let result = parse_request(request).unwrap();
        assert_eq!(result.body, b"raw body".to_vec());
    }

    #[test]
    fn test_query_parameters_and_route_path() {
        let request = b"GET /users?id=7&verbose&empty= HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.path, "/users?id=7&verbose&empty=");
        assert_eq!(result.route_path(), "/users");
        assert_eq!(result.get_query_param("id").unwrap(), "7");
        assert_eq!(result.get_query_param("verbose").unwrap(), "");
        assert!(result.has_query_param("empty"));
        assert!(!result.has_query_param("missing"));
    }

    #[test]
    fn test_route_path_without_query() {
        let request = HttpRequest::new(Method::GET, "/health", HttpVersion::Http11, HashMap::new());
        assert_eq!(request.route_path(), "/health");
    }

    #[test]
    fn test_with_remote_addr() {
        let request = HttpRequest::new(Method::GET, "/", HttpVersion::Http10, HashMap::new())
            .with_remote_addr("10.0.0.1:53211");
        assert_eq!(request.remote_addr, "10.0.0.1:53211");
    }

    #[test]
    fn test_method_and_version_display() {
        assert_eq!(Method::PATCH.to_string(), "PATCH");
        assert_eq!(Method::OPTIONS.as_str(), "OPTIONS");
        assert_eq!(HttpVersion::Http11.to_string(), "HTTP/1.1");
        assert_eq!("HTTP/2.0".parse::<HttpVersion>().unwrap(), HttpVersion::Http20);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NewUser {
        name: String,
    }

    #[test]
    fn test_json_body() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json; charset=utf-8".to_string());

        let request = HttpRequest::new(Method::POST, "/users", HttpVersion::Http11, headers.clone())
            .with_body(br#"{"name":"Alice"}"#.to_vec());
        let user: NewUser = request.json().unwrap();
        assert_eq!(user, NewUser { name: "Alice".to_string() });

        let broken = HttpRequest::new(Method::POST, "/users", HttpVersion::Http11, headers)
            .with_body(&b"{\"name\":}"[..]);
        let result: Result<NewUser, _> = broken.json();
        assert!(matches!(result, Err(Error::JsonError(_))));

        let plain = HttpRequest::new(Method::POST, "/users", HttpVersion::Http11, HashMap::new());
        let result: Result<NewUser, _> = plain.json();
        assert!(matches!(result, Err(Error::MissingHeader(_))));
    }

    #[test]
    fn test_find_head_end() {
        assert_eq!(find_head_end(b"HTTP/1.1 200 OK\r\n\r\nbody"), Some(19));
        assert_eq!(find_head_end(b"HTTP/1.1 200 OK\n\nbody"), Some(17));
        assert_eq!(find_head_end(b"HTTP/1.1 200 OK\r\nContent-"), None);
    }

    #[test]
    fn test_parse_response_head() {
        let response = b"HTTP/1.1 404 Not Found\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: 21\r\n\r\n{\"message\":\"no user\"}";
        let head = parse_response_head(response).unwrap();
        assert_eq!(head.version, HttpVersion::Http11);
        assert_eq!(head.status, 404);
        assert_eq!(head.reason, "Not Found");
        assert_eq!(head.get_header("content-type").unwrap(), "application/json; charset=utf-8");
        assert_eq!(head.content_length(), Some(21));
    }

    #[test]
    fn test_parse_response_head_without_reason() {
        let head = parse_response_head(b"HTTP/1.0 204\r\n\r\n").unwrap();
        assert_eq!(head.status, 204);
        assert!(head.reason.is_empty());
        assert_eq!(head.content_length(), None);
    }

    #[test]
    fn test_parse_response_head_errors() {
        assert!(matches!(parse_response_head(b""), Err(Error::EmptyRequest)));
        assert!(matches!(
            parse_response_head(b"HTTP/1.1\r\n\r\n"),
            Err(Error::MalformedStatusLine(_))
        ));
        assert!(matches!(
            parse_response_head(b"HTTP/1.1 2000 OK\r\n\r\n"),
            Err(Error::InvalidStatusCode(ref c)) if c == "2000"
        ));
        assert!(matches!(
            parse_response_head(b"HTTP/1.1 abc OK\r\n\r\n"),
            Err(Error::InvalidStatusCode(_))
        ));
        assert!(matches!(
            parse_response_head(b"SPDY/3 200 OK\r\n\r\n"),
            Err(Error::InvalidVersion(_))
        ));
    }
}
