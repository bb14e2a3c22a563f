//! Caller identity carried in the `userinfo` request header.
//!
//! The header holds base64url-encoded UTF-8 text. It is only decoded and
//! logged; nothing branches on its contents.

use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use thiserror::Error;

pub const USERINFO_HEADER: &str = "userinfo";

/// URL-safe alphabet, accepting input with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("userinfo is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("userinfo is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn decode_userinfo(raw: &str) -> Result<String, IdentityError> {
    let bytes = URL_SAFE_LENIENT.decode(raw.trim())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
pub fn encode_userinfo(text: &str) -> String {
    base64::engine::general_purpose::URL_SAFE.encode(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_text() {
        let original = r#"{"uid":"42","name":"张三"}"#;
        let encoded = encode_userinfo(original);
        assert_eq!(decode_userinfo(&encoded).unwrap(), original);
    }

    #[test]
    fn unpadded_input_is_accepted() {
        let encoded = encode_userinfo("ab");
        let unpadded = encoded.trim_end_matches('=');
        assert_ne!(encoded, unpadded);
        assert_eq!(decode_userinfo(unpadded).unwrap(), "ab");
    }

    #[test]
    fn url_safe_alphabet_is_used() {
        // [0xfb, 0xff] in the URL-safe alphabet: decodes, but is not UTF-8.
        assert!(matches!(
            decode_userinfo("-_8="),
            Err(IdentityError::Utf8(_))
        ));
    }

    #[test]
    fn garbage_is_a_base64_error() {
        assert!(matches!(
            decode_userinfo("not base64!!"),
            Err(IdentityError::Base64(_))
        ));
    }
}
