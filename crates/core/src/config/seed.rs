use derive_more::Display;
use fnv::FnvHasher;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{
    convert::{Infallible, TryFrom},
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Seed for the RNG that places atoms.
///
/// A seed can be given as a non-negative integer, or as any text. Text that
/// parses as a `u64` is treated exactly like that integer, so `"42"` and `42`
/// produce the same game. Any other text is hashed into a `u64` when the seed
/// is used, which makes it easy to share games with memorable seeds like
/// `"tuesday"`.
///
/// Seeds always serialize as a **string**. JSON and TOML can't reliably hold
/// a full 64-bit unsigned integer, and a string survives the round trip.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    Int(u64),
    Text(String),
}

impl Seed {
    /// Convert the seed to the `u64` that actually seeds the RNG
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        text.parse::<u64>()
            .map_or_else(|_| Self::Text(text.to_owned()), Self::Int)
    }
}

impl FromStr for Seed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Seeds can be numbers or strings, so there's no type hint to give
        deserializer.deserialize_any(SeedVisitor)
    }
}

struct SeedVisitor;

impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or a string")
    }

    // Smaller unsigned ints are forwarded here by serde
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Seed::Int(value))
    }

    // Smaller signed ints are forwarded here by serde
    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value).map(Seed::Int).map_err(|_| {
            E::custom(format!("seed must not be negative, got {}", value))
        })
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.into())
    }
}
