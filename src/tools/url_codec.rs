//! Percent-encoding per RFC 3986.
//!
//! Everything outside the unreserved set `A-Z a-z 0-9 - . _ ~` is encoded,
//! reserved characters included, so the output is safe as a single query
//! value or path segment.

use crate::error::{Result, ToolError};

pub fn encode(text: &str, plus_for_space: bool) -> String {
    let encoded = urlencoding::encode(text);
    if plus_for_space {
        encoded.replace("%20", "+")
    } else {
        encoded.into_owned()
    }
}

pub fn decode(text: &str, plus_for_space: bool) -> Result<String> {
    let source = if plus_for_space {
        text.replace('+', " ")
    } else {
        text.to_string()
    };
    check_percent_sequences(&source)?;
    urlencoding::decode(&source)
        .map(|s| s.into_owned())
        .map_err(|e| ToolError::InvalidEncoding(format!("decoded bytes aren't UTF-8 ({e})")))
}

/// Every `%` must introduce exactly two hex digits.
fn check_percent_sequences(text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let ok = bytes.len() >= i + 3
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !ok {
                let end = (i + 3).min(bytes.len());
                let snippet = String::from_utf8_lossy(&bytes[i..end]);
                log::warn!("url decode rejected at byte {i}");
                return Err(ToolError::InvalidEncoding(format!(
                    "malformed percent sequence {snippet:?} at position {i}"
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(
            encode("https://example.com?q=hello world&x=1", false),
            "https%3A%2F%2Fexample.com%3Fq%3Dhello%20world%26x%3D1"
        );
        assert_eq!(encode("a-b_c.d~e", false), "a-b_c.d~e");
        assert_eq!(encode("é", false), "%C3%A9");
    }

    #[test]
    fn plus_for_space_mode() {
        assert_eq!(encode("a b+c", true), "a+b%2Bc");
        assert_eq!(decode("a+b%2Bc", true).unwrap(), "a b+c");
        assert_eq!(decode("a+b", false).unwrap(), "a+b");
    }

    #[test]
    fn decodes_round_trip() {
        let s = "key=välue & more/stuff?#";
        assert_eq!(decode(&encode(s, false), false).unwrap(), s);
        assert_eq!(decode(&encode(s, true), true).unwrap(), s);
    }

    #[test]
    fn rejects_malformed_sequences() {
        for bad in ["%", "abc%2", "%zz", "100%", "%G1"] {
            let err = decode(bad, false).unwrap_err();
            assert!(matches!(err, ToolError::InvalidEncoding(_)), "{bad}");
        }
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(decode("%FF", false), Err(ToolError::InvalidEncoding(_))));
    }
}
