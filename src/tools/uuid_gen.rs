//! UUID v4 and v7 generation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_BATCH: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UuidVersion {
    #[default]
    V4,
    V7,
}

impl UuidVersion {
    pub fn label(self) -> &'static str {
        match self {
            UuidVersion::V4 => "v4",
            UuidVersion::V7 => "v7",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidFormat {
    pub uppercase: bool,
    pub hyphens: bool,
}

impl Default for UuidFormat {
    fn default() -> Self {
        Self {
            uppercase: false,
            hyphens: true,
        }
    }
}

pub fn generate_v4() -> Uuid {
    Uuid::new_v4()
}

/// Time-ordered UUID stamped with the current Unix millisecond.
pub fn generate_v7() -> Uuid {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    // v4 and v7 put version and variant at the same offsets, so bytes 6..16 of a
    // v4 carry exactly the 74 random bits v7 needs once those fields are rewritten.
    let entropy = Uuid::new_v4().into_bytes();
    let mut random = [0u8; 10];
    random.copy_from_slice(&entropy[6..]);
    v7_from_parts(millis, random)
}

/// Packs a v7 layout: 48-bit big-endian millis, version 7, variant `10`,
/// then the random bytes with their version/variant bits overwritten.
pub fn v7_from_parts(millis: u64, random: [u8; 10]) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[..6].copy_from_slice(&millis.to_be_bytes()[2..8]);
    bytes[6..].copy_from_slice(&random);

    bytes[6] = (bytes[6] & 0x0F) | 0x70;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Unix millisecond prefix of a v7 value.
pub fn v7_millis(id: &Uuid) -> u64 {
    let b = id.as_bytes();
    let mut buf = [0u8; 8];
    buf[2..].copy_from_slice(&b[..6]);
    u64::from_be_bytes(buf)
}

pub fn format_uuid(id: &Uuid, fmt: UuidFormat) -> String {
    let s = if fmt.hyphens {
        id.hyphenated().to_string()
    } else {
        id.simple().to_string()
    };
    if fmt.uppercase {
        s.to_uppercase()
    } else {
        s
    }
}

/// Generates `quantity` formatted ids; quantity is clamped into 1..=1000.
pub fn generate_batch(version: UuidVersion, quantity: usize, fmt: UuidFormat) -> Vec<String> {
    let n = quantity.clamp(1, MAX_BATCH);
    let out: Vec<String> = (0..n)
        .map(|_| {
            let id = match version {
                UuidVersion::V4 => generate_v4(),
                UuidVersion::V7 => generate_v7(),
            };
            format_uuid(&id, fmt)
        })
        .collect();
    log::debug!("generated {} uuid {}", out.len(), version.label());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant_bits(id: &Uuid) -> u8 {
        id.as_bytes()[8] >> 6
    }

    #[test]
    fn v4_version_and_variant() {
        for _ in 0..64 {
            let id = generate_v4();
            assert_eq!(id.get_version_num(), 4);
            assert_eq!(variant_bits(&id), 0b10);
        }
    }

    #[test]
    fn v7_version_variant_and_prefix() {
        let id = v7_from_parts(0x0123_4567_89AB, [0xFF; 10]);
        assert_eq!(id.get_version_num(), 7);
        assert_eq!(variant_bits(&id), 0b10);
        assert_eq!(v7_millis(&id), 0x0123_4567_89AB);
        assert!(id.hyphenated().to_string().starts_with("01234567-89ab-7fff-bfff"));
    }

    #[test]
    fn v7_truncates_millis_to_48_bits() {
        let id = v7_from_parts(0xFFFF_0000_0000_0001, [0; 10]);
        assert_eq!(v7_millis(&id), 1);
    }

    #[test]
    fn v7_sorts_by_time() {
        let earlier = v7_from_parts(1_700_000_000_000, [0xFF; 10]);
        let later = v7_from_parts(1_700_000_000_001, [0x00; 10]);
        assert!(earlier < later);
        assert!(earlier.to_string() < later.to_string());
    }

    #[test]
    fn generated_v7_carries_current_time() {
        let before = u64::try_from(Utc::now().timestamp_millis()).unwrap();
        let id = generate_v7();
        let after = u64::try_from(Utc::now().timestamp_millis()).unwrap();
        assert_eq!(id.get_version_num(), 7);
        assert!((before..=after).contains(&v7_millis(&id)));
    }

    #[test]
    fn generated_v7_random_bits_vary() {
        let mut rand_a_high = std::collections::HashSet::new();
        let mut rand_b_high = std::collections::HashSet::new();
        for _ in 0..256 {
            let id = generate_v7();
            assert_eq!(id.get_version_num(), 7);
            assert_eq!(variant_bits(&id), 0b10);
            let b = id.as_bytes();
            rand_a_high.insert(b[12] >> 4);
            rand_b_high.insert(b[14] >> 6);
        }
        assert!(rand_a_high.len() > 1, "byte 12 high nibble stuck at {rand_a_high:?}");
        assert!(rand_b_high.len() > 1, "byte 14 top bits stuck at {rand_b_high:?}");
    }

    #[test]
    fn generated_v7_orders_across_milliseconds() {
        let first = generate_v7();
        while u64::try_from(Utc::now().timestamp_millis()).unwrap() <= v7_millis(&first) {
            std::hint::spin_loop();
        }
        let second = generate_v7();
        assert!(v7_millis(&first) < v7_millis(&second));
        assert!(first < second);
        assert!(first.to_string() < second.to_string());
    }

    #[test]
    fn formatting_options() {
        let id = v7_from_parts(0x0123_4567_89AB, [0xAB; 10]);
        let upper = format_uuid(&id, UuidFormat { uppercase: true, hyphens: false });
        assert_eq!(upper.len(), 32);
        assert!(!upper.contains('-'));
        assert_eq!(upper, upper.to_uppercase());
        assert_eq!(format_uuid(&id, UuidFormat::default()).len(), 36);
    }

    #[test]
    fn batch_is_clamped() {
        assert_eq!(generate_batch(UuidVersion::V4, 0, UuidFormat::default()).len(), 1);
        assert_eq!(generate_batch(UuidVersion::V7, 5000, UuidFormat::default()).len(), MAX_BATCH);
        let ids = generate_batch(UuidVersion::V4, 10, UuidFormat::default());
        let mut dedup = ids.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), 10);
    }
}
