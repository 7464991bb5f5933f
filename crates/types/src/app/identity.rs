// Path: crates/types/src/app/identity.rs
//! Account and chain identifiers.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A unique identifier for a blockchain instance, used to prevent cross-chain replays.
#[derive(
    Encode,
    Decode,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    Default,
    Hash,
)]
#[serde(transparent)] // Ensures JSON/TOML is just the raw u32
pub struct ChainId(pub u32);

impl From<u32> for ChainId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl core::fmt::Display for ChainId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stable identifier for an on-chain account. Validators, call creators and
/// currency holders are all addressed by an `AccountId`.
///
/// Human-readable encodings (JSON, TOML, logs) render it as 64 lowercase hex digits.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct AccountId(pub [u8; 32]);

impl AsRef<[u8]> for AccountId {
    /// Allows treating the `AccountId` as a byte slice.
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for AccountId {
    /// Allows creating an `AccountId` directly from a 32-byte array.
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| format!("invalid account id hex: {e}"))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|v: Vec<u8>| format!("account id must be 32 bytes, got {}", v.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_hex_roundtrip_and_prefix() {
        let id = AccountId([0xab; 32]);
        let text = id.to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<AccountId>().unwrap(), id);
        assert_eq!(format!("0x{text}").parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn account_id_rejects_wrong_length() {
        let err = "abcd".parse::<AccountId>().unwrap_err();
        assert!(err.contains("32 bytes"));
    }

    #[test]
    fn account_id_serializes_as_hex_string() {
        let json = serde_json::to_string(&AccountId([1u8; 32])).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
    }
}
