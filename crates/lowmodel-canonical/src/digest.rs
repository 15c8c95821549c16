use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Length in bytes of every object digest.
pub const DIGEST_LEN: usize = 32;

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlg {
    /// SHA-256, the only algorithm objects are hashed with.
    #[serde(rename = "sha-256")]
    Sha256,
}

/// Fixed-size SHA-256 fingerprint of an object's semantic content.
///
/// Displays as lowercase hex; serializes as `{"alg":"sha-256","b64":...}`
/// with base64url (no padding) bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wraps raw digest bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Algorithm that produced this digest.
    pub fn alg(&self) -> DigestAlg {
        DigestAlg::Sha256
    }

    /// Lowercase hex rendering, as used inside hash fragments.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Base64url (no padding) rendering.
    pub fn to_b64(&self) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(self.0)
    }

    /// Parses a lowercase or uppercase hex digest.
    pub fn from_hex(value: &str) -> Result<Self, ValidationError> {
        let bytes = hex::decode(value).map_err(|_| ValidationError::InvalidEncoding {
            field: "digest",
            encoding: "hex",
            value: value.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    /// Parses a base64url (no padding) digest.
    pub fn from_b64(value: &str) -> Result<Self, ValidationError> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|_| ValidationError::InvalidEncoding {
                field: "digest",
                encoding: "base64url",
                value: value.to_string(),
            })?;
        Self::from_slice(&bytes)
    }

    fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| ValidationError::InvalidLength {
            field: "digest",
            expected: DIGEST_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parses either rendering: 64 hex digits, or base64url without padding.
impl FromStr for Digest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == DIGEST_LEN * 2 {
            Self::from_hex(s)
        } else {
            Self::from_b64(s)
        }
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

#[derive(Serialize, Deserialize)]
struct DigestRepr {
    alg: DigestAlg,
    b64: String,
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DigestRepr {
            alg: self.alg(),
            b64: self.to_b64(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = DigestRepr::deserialize(deserializer)?;
        Digest::from_b64(&repr.b64).map_err(serde::de::Error::custom)
    }
}
