use base64::{engine::general_purpose::STANDARD, Engine};

/// Encode raw image bytes for embedding in JSON responses
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bytes() {
        assert_eq!(encode_base64(b"ohm"), "b2ht");
        assert_eq!(encode_base64(b""), "");
    }
}
