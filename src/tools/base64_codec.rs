//! Base64 encode/decode (RFC 4648, padded).

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// URL-safe alphabet that accepts segments with or without trailing `=`.
/// JWT segments are unpadded, hand-edited tokens sometimes are not.
pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Base64Alphabet {
    #[default]
    Standard,
    UrlSafe,
}

impl Base64Alphabet {
    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Base64Alphabet::Standard => &STANDARD,
            Base64Alphabet::UrlSafe => &URL_SAFE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Base64Alphabet::Standard => "Standard",
            Base64Alphabet::UrlSafe => "URL-safe",
        }
    }
}

pub fn encode(bytes: &[u8], alphabet: Base64Alphabet) -> String {
    alphabet.engine().encode(bytes)
}

/// Decodes padded Base64; surrounding whitespace is ignored.
pub fn decode(text: &str, alphabet: Base64Alphabet) -> Result<Vec<u8>> {
    alphabet
        .engine()
        .decode(text.trim().as_bytes())
        .map_err(|e| {
            log::warn!("base64 decode rejected: {e}");
            ToolError::InvalidEncoding(e.to_string())
        })
}

/// Decodes and requires the result to be UTF-8 text.
pub fn decode_to_text(text: &str, alphabet: Base64Alphabet) -> Result<String> {
    let bytes = decode(text, alphabet)?;
    String::from_utf8(bytes).map_err(|e| {
        ToolError::InvalidEncoding(format!("decoded bytes aren't UTF-8 ({e})"))
    })
}
