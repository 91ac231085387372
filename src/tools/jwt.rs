//! Structural JWT decoding.
//!
//! Only the encoding is unpacked: header and payload are base64url-decoded
//! and parsed as JSON. The signature is never checked, so a decoded token
//! says nothing about whether it is authentic.

use base64::Engine;
use serde_json::Value;

use crate::error::{Result, Segment, ToolError};
use crate::tools::base64_codec::URL_SAFE_LENIENT;
use crate::tools::{json_format, timestamp};

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedJwt {
    pub header: Value,
    pub payload: Value,
    /// Raw third segment, still base64url.
    pub signature: String,
}

impl DecodedJwt {
    pub fn header_pretty(&self) -> String {
        json_format::render_pretty(&self.header, 2)
    }

    pub fn payload_pretty(&self) -> String {
        json_format::render_pretty(&self.payload, 2)
    }

    pub fn claims(&self) -> ClaimsSummary {
        ClaimsSummary::from_decoded(self)
    }
}

pub fn decode(token: &str) -> Result<DecodedJwt> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        log::warn!("jwt rejected: {} segment(s)", parts.len());
        return Err(ToolError::malformed(
            Segment::Structure,
            format!("expected 3 dot-separated segments, found {}", parts.len()),
        ));
    }

    let header = decode_segment(parts[0], Segment::Header)?;
    let payload = decode_segment(parts[1], Segment::Payload)?;

    Ok(DecodedJwt {
        header,
        payload,
        signature: parts[2].to_string(),
    })
}

fn decode_segment(part: &str, segment: Segment) -> Result<Value> {
    if part.is_empty() {
        return Err(ToolError::malformed(segment, "segment is empty"));
    }
    let bytes = URL_SAFE_LENIENT
        .decode(part.as_bytes())
        .map_err(|e| ToolError::malformed(segment, format!("base64url decode error: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| ToolError::malformed(segment, format!("not UTF-8: {e}")))?;
    serde_json::from_str(&text)
        .map_err(|e| ToolError::malformed(segment, format!("not JSON: {e}")))
}

/// Registered claims worth surfacing at a glance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsSummary {
    pub algorithm: Option<String>,
    pub token_type: Option<String>,
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub audience: Option<String>,
    pub expires: Option<String>,
    pub not_before: Option<String>,
    pub issued_at: Option<String>,
    pub jwt_id: Option<String>,
}

fn text_claim(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|i| i.as_str().map_or_else(|| i.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

/// Numeric dates render as UTC; anything else is shown like a text claim.
fn date_claim(v: &Value, key: &str) -> Option<String> {
    let raw = v.get(key)?;
    raw.as_i64()
        .or_else(|| raw.as_f64().map(|f| f as i64))
        .and_then(timestamp::format_utc_seconds)
        .or_else(|| text_claim(v, key))
}

impl ClaimsSummary {
    pub fn from_decoded(jwt: &DecodedJwt) -> Self {
        let p = &jwt.payload;
        Self {
            algorithm: text_claim(&jwt.header, "alg"),
            token_type: text_claim(&jwt.header, "typ"),
            issuer: text_claim(p, "iss"),
            subject: text_claim(p, "sub"),
            audience: text_claim(p, "aud"),
            expires: date_claim(p, "exp"),
            not_before: date_claim(p, "nbf"),
            issued_at: date_claim(p, "iat"),
            jwt_id: text_claim(p, "jti"),
        }
    }

    /// (label, value) rows; algorithm and type always appear.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let na = || "N/A".to_string();
        let mut rows = vec![
            ("Algorithm", self.algorithm.clone().unwrap_or_else(na)),
            ("Type", self.token_type.clone().unwrap_or_else(na)),
        ];
        let optional = [
            ("Issuer", &self.issuer),
            ("Subject", &self.subject),
            ("Audience", &self.audience),
            ("Expires", &self.expires),
            ("Not Before", &self.not_before),
            ("Issued At", &self.issued_at),
            ("JWT ID", &self.jwt_id),
        ];
        rows.extend(
            optional
                .into_iter()
                .filter_map(|(label, v)| v.clone().map(|v| (label, v))),
        );
        rows
    }
}
