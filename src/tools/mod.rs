//! The tool set and the dispatch list the shell navigates.

pub mod base64_codec;
pub mod hash;
pub mod json_format;
pub mod json_path;
pub mod jwt;
pub mod timestamp;
pub mod url_codec;
pub mod uuid_gen;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolKind {
    JsonFormatter,
    JsonPath,
    Base64,
    Uuid,
    Jwt,
    Url,
    Timestamp,
    Hash,
}

/// Sidebar order.
pub const TOOLS: &[ToolKind] = &[
    ToolKind::JsonFormatter,
    ToolKind::JsonPath,
    ToolKind::Base64,
    ToolKind::Uuid,
    ToolKind::Jwt,
    ToolKind::Url,
    ToolKind::Timestamp,
    ToolKind::Hash,
];

impl ToolKind {
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::JsonFormatter => "JSON Formatter",
            ToolKind::JsonPath => "JSON Path Filter",
            ToolKind::Base64 => "Base64 Encode/Decode",
            ToolKind::Uuid => "UUID Generator",
            ToolKind::Jwt => "JWT Decoder",
            ToolKind::Url => "URL Encoder/Decoder",
            ToolKind::Timestamp => "Timestamp Converter",
            ToolKind::Hash => "Hash Generator",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            ToolKind::JsonFormatter => "Format, validate, and minify JSON data.",
            ToolKind::JsonPath => "Extract nodes from JSON with JSONPath expressions.",
            ToolKind::Base64 => "Encode text to Base64 or decode it back.",
            ToolKind::Uuid => "Generate random (v4) or time-ordered (v7) UUIDs.",
            ToolKind::Jwt => "Inspect the header and claims of a JSON Web Token.",
            ToolKind::Url => "Percent-encode or decode text for use in URLs.",
            ToolKind::Timestamp => "Convert between Unix timestamps and dates.",
            ToolKind::Hash => "Digest text with MD5, SHA1, SHA256, or SHA512.",
        }
    }

    /// Looks a tool up by its sidebar label.
    pub fn from_label(label: &str) -> Option<Self> {
        TOOLS.iter().copied().find(|t| t.label() == label)
    }
}
