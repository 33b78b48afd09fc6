//! Content-addressed sprite names.
//!
//! A sprite is named after a hash of its encoded bytes, so any change to a
//! member image changes the name, and identical sprites share one file.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a name (8 base64 characters).
pub const NAME_DIGEST_BYTES: usize = 6;

/// Derive the output name for encoded sprite bytes.
pub fn content_name(encoded: &[u8]) -> String {
    let digest = Sha256::digest(encoded);
    format!("{}.png", URL_SAFE_NO_PAD.encode(&digest[..NAME_DIGEST_BYTES]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_name_shape() {
        let name = content_name(b"sprite bytes");
        assert_eq!(name.len(), 12);
        assert!(name.ends_with(".png"));
        assert!(name[..8]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_content_name_known_digest() {
        // SHA-256("") starts e3 b0 c4 42 98 fc
        assert_eq!(content_name(b""), "47DEQpj8.png");
    }

    #[test]
    fn test_content_name_tracks_content() {
        assert_eq!(content_name(b"abc"), content_name(b"abc"));
        assert_ne!(content_name(b"abc"), content_name(b"abd"));
    }
}
