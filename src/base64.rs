use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Decode a `!!binary` style scalar (may contain newlines or spaces).
///
/// Returns `None` when the text is not valid padded base64. The caller does
/// not need to check the tag first: any scalar may be read as binary.
pub(crate) fn decode_base64_yaml(s: &str) -> Option<Vec<u8>> {
    // YAML allows ASCII whitespace inside the base64 text.
    let cleaned: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    STANDARD.decode(cleaned).ok()
}

/// Encode bytes as base64 text for a `!!binary` scalar.
#[cfg(feature = "serde")]
pub(crate) fn encode_base64_yaml(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
