//! Message digests rendered as lowercase hex.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::ToolError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HashAlgorithm {
    Md5,
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

pub const ALGORITHMS: [HashAlgorithm; 4] = [
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha512,
];

impl HashAlgorithm {
    pub fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Hex length of the digest.
    pub fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha1 => 40,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha512 => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match norm.as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(ToolError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

pub fn digest_hex(algorithm: HashAlgorithm, input: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::Md5 => format!("{:x}", md5::compute(input)),
        HashAlgorithm::Sha1 => hex::encode(Sha1::digest(input)),
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(input)),
    }
}

/// Every supported digest of `input`, in [`ALGORITHMS`] order.
pub fn digest_all(input: &[u8]) -> Vec<(HashAlgorithm, String)> {
    ALGORITHMS
        .iter()
        .map(|a| (*a, digest_hex(*a, input)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digests_of_abc() {
        assert_eq!(digest_hex(HashAlgorithm::Md5, b"abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            digest_hex(HashAlgorithm::Sha1, b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            digest_hex(HashAlgorithm::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(digest_hex(HashAlgorithm::Sha512, b"abc").starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn digest_lengths_are_lowercase_hex() {
        for (algo, hex) in digest_all(b"hello world") {
            assert_eq!(hex.len(), algo.hex_len());
            assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("sha_512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        let err = "crc32".parse::<HashAlgorithm>().unwrap_err();
        assert_eq!(err, ToolError::UnsupportedAlgorithm("crc32".into()));
    }
}
