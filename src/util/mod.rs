//! Small shared helpers: percent-encoding and random hex values.

use uuid::Uuid;

/// Percent-encode a query-string component (RFC 3986 unreserved set).
pub fn urlencoded(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

/// Generate `byte_count` random bytes, hex-encoded.
pub fn random_hex(byte_count: usize) -> String {
    let mut bytes = Vec::with_capacity(byte_count + 16);
    while bytes.len() < byte_count {
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    }
    bytes.truncate(byte_count);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
