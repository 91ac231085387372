//! JSON pretty-printing and minification.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{Result, ToolError};

pub const MAX_INDENT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFormatOptions {
    pub indent: usize,
    pub sort_keys: bool,
}

impl Default for JsonFormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sort_keys: false,
        }
    }
}

pub fn parse(input: &str) -> Result<Value> {
    serde_json::from_str(input.trim()).map_err(|e| {
        log::warn!("json parse failed: {e}");
        ToolError::from(e)
    })
}

/// Pretty-prints with `opts.indent` spaces (clamped to 0..=8).
pub fn pretty(input: &str, opts: &JsonFormatOptions) -> Result<String> {
    let mut v = parse(input)?;
    if opts.sort_keys {
        sort_keys(&mut v);
    }
    Ok(render_pretty(&v, opts.indent))
}

pub fn minify(input: &str) -> Result<String> {
    let v = parse(input)?;
    Ok(v.to_string())
}

pub(crate) fn render_pretty(v: &Value, indent: usize) -> String {
    let pad = " ".repeat(indent.min(MAX_INDENT));
    let fmt = PrettyFormatter::with_indent(pad.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    // Writing a Value into a Vec cannot fail.
    if v.serialize(&mut ser).is_err() {
        return v.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| v.to_string())
}

/// Recursively orders object keys.
pub fn sort_keys(v: &mut Value) {
    match v {
        Value::Object(map) => {
            for child in map.values_mut() {
                sort_keys(child);
            }
            let mut entries: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            map.extend(entries);
        }
        Value::Array(arr) => {
            for child in arr.iter_mut() {
                sort_keys(child);
            }
        }
        _ => {}
    }
}
