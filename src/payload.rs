//! Encoded payload formatting.
//!
//! Payloads travel as data URLs: the fixed ASCII header
//! `data:image/jpeg;base64` followed by a comma and the base64-encoded JPEG
//! bytes. [`strip_header`] removes the prefix for callers that want the bare
//! base64 body; it is pure and idempotent (a stripped payload no longer
//! matches the header and passes through unchanged).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Header prefixed to every produced payload (the comma separator follows).
pub const DATA_URL_HEADER: &str = "data:image/jpeg;base64";

/// Wrap encoded JPEG bytes as a data URL.
pub fn to_data_url(jpeg: &[u8]) -> String {
    format!("{DATA_URL_HEADER},{}", STANDARD.encode(jpeg))
}

/// Strip the data-URL header: if the payload opens with `data:image`,
/// return everything after the first comma; otherwise return it unchanged.
pub fn strip_header(payload: &str) -> &str {
    if payload.starts_with("data:image") {
        match payload.find(',') {
            Some(idx) => &payload[idx + 1..],
            None => payload,
        }
    } else {
        payload
    }
}
