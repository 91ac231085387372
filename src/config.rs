//! Persisted user preferences.
//!
//! Stored as one JSON blob in local storage. Every field has a default, so a
//! blob written by an older build still loads.

use serde::{Deserialize, Serialize};

use crate::tools::base64_codec::Base64Alphabet;
use crate::tools::hash::HashAlgorithm;
use crate::tools::json_format::JsonFormatOptions;
use crate::tools::timestamp::{DateFormat, UnitHint, Zone};
use crate::tools::uuid_gen::{UuidFormat, UuidVersion};
use crate::tools::ToolKind;

pub const LS_KEY_PREFS: &str = "devbench_prefs_v1";
pub const LS_KEY_PATH_HISTORY: &str = "devbench_jsonpath_history_v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    pub last_tool: String,
    pub json: JsonFormatOptions,
    pub base64_alphabet: Base64Alphabet,
    pub uuid_version: UuidVersion,
    pub uuid_quantity: usize,
    pub uuid_format: UuidFormat,
    pub url_plus_for_space: bool,
    pub hash_algorithm: HashAlgorithm,
    pub ts_unit: UnitHint,
    pub ts_zone: Zone,
    pub ts_format: DateFormat,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            last_tool: ToolKind::JsonFormatter.label().to_string(),
            json: JsonFormatOptions::default(),
            base64_alphabet: Base64Alphabet::default(),
            uuid_version: UuidVersion::default(),
            uuid_quantity: 1,
            uuid_format: UuidFormat::default(),
            url_plus_for_space: false,
            hash_algorithm: HashAlgorithm::default(),
            ts_unit: UnitHint::default(),
            ts_zone: Zone::default(),
            ts_format: DateFormat::default(),
        }
    }
}

impl Prefs {
    /// Corrupt input falls back to defaults.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            log::warn!("ignoring stored prefs: {e}");
            Prefs::default()
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn last_tool(&self) -> ToolKind {
        ToolKind::from_label(&self.last_tool).unwrap_or(ToolKind::JsonFormatter)
    }
}
