use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a reproducible deal.
///
/// 128 bits, written as 32 hex digits (big-endian). Dealing twice with the
/// same seed and configuration yields the same draw order.
///
/// ```
/// use mafia_engine::DealSeed;
///
/// let seed: DealSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// assert_eq!(seed.to_string(), "0123456789abcdef0123456789abcdef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealSeed(pub(crate) [u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: {text}")]
    Digits { text: String },
}

impl fmt::Display for DealSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for DealSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::Length { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::Digits {
            text: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for DealSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DealSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<DealSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> DealSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        DealSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_big_endian_hex() {
        let seed = DealSeed([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
            0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            serde_json::to_string(&seed).unwrap(),
            "\"0123456789abcdeffedcba9876543210\""
        );
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let seed: DealSeed = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF".parse().unwrap();
        assert_eq!(seed.0, [0xFF; 16]);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "abc".parse::<DealSeed>(),
            Err(ParseSeedError::Length { len: 3 })
        );
        assert_eq!("".parse::<DealSeed>(), Err(ParseSeedError::Length { len: 0 }));
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let err = "ghijklmnopqrstuvwxyzghijklmnopqr"
            .parse::<DealSeed>()
            .unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn test_deserialize_reports_invalid_hex() {
        let result: Result<DealSeed, _> = serde_json::from_str("\"0123\"");
        assert!(result.unwrap_err().to_string().contains("invalid hex"));
    }

    #[test]
    fn test_random_seed_round_trips_through_json() {
        let seed: DealSeed = rand::rng().random();
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(serde_json::from_str::<DealSeed>(&json).unwrap(), seed);
    }
}
