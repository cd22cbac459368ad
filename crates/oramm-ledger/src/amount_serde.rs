//! Serde adapters for `u128` amounts.
//!
//! Neither TOML nor JavaScript consumers handle 128-bit integers, so amounts
//! are written as decimal strings. Reading accepts either a string or a plain
//! integer, which keeps hand-written config files ergonomic.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub fn serialize<S: Serializer>(val: &u128, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&val.to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u128, D::Error> {
    d.deserialize_any(U128Visitor)
}

struct U128Visitor;

impl<'de> Visitor<'de> for U128Visitor {
    type Value = u128;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a u128 as a string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
        Ok(v as u128)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
        if v >= 0 {
            Ok(v as u128)
        } else {
            Err(E::custom("negative value for u128"))
        }
    }
}

/// `BTreeMap<String, u128>` with string-encoded values.
pub mod map {
    use super::*;
    use serde::ser::SerializeMap;
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(map: &BTreeMap<String, u128>, s: S) -> Result<S::Ok, S::Error> {
        let mut out = s.serialize_map(Some(map.len()))?;
        for (k, v) in map {
            out.serialize_entry(k, &v.to_string())?;
        }
        out.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<String, u128>, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(d)?;
        raw.into_iter()
            .map(|(k, v)| v.parse::<u128>().map(|n| (k, n)).map_err(de::Error::custom))
            .collect()
    }
}
