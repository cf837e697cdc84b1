//! Header sets attached to read-endpoint responses.
//!
//! Successful lookups and not-found lookups carry distinct header sets so
//! intermediaries can tell them apart without parsing bodies.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Identifies this service as the response producer
pub const RESPONSE_SOURCE: &str = "x-response-source";

/// Marks the outcome of a read operation
pub const READ_RESULT: &str = "x-read-result";

/// Header set for a successful read
pub fn success_read() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(RESPONSE_SOURCE),
        HeaderValue::from_static("user-manager"),
    );
    headers.insert(
        HeaderName::from_static(READ_RESULT),
        HeaderValue::from_static("hit"),
    );
    headers
}

/// Header set for a read that found nothing
pub fn error_read() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static(RESPONSE_SOURCE),
        HeaderValue::from_static("user-manager"),
    );
    headers.insert(
        HeaderName::from_static(READ_RESULT),
        HeaderValue::from_static("miss"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sets_are_distinguishable() {
        let success = success_read();
        let error = error_read();

        assert_eq!(success.get(READ_RESULT).unwrap(), "hit");
        assert_eq!(error.get(READ_RESULT).unwrap(), "miss");
        assert_eq!(success.get(RESPONSE_SOURCE), error.get(RESPONSE_SOURCE));
    }
}
