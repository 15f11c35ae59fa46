//! Serde adapter writing a position-keyed `OrdMap` as a sequence of
//! `(key, value)` pairs.
//!
//! JSON object keys must be strings; a `Pos` key is a struct. Pairs keep the
//! key structured and decode back to the same map.
//!
//! ```ignore
//! #[serde(with = "crate::persist::pairs")]
//! pub gears: OrdMap<Pos, Gear>,
//! ```

use im::OrdMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<K, V, S>(map: &OrdMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize + Ord + Clone,
    V: Serialize + Clone,
    S: Serializer,
{
    serializer.collect_seq(map.iter())
}

pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<OrdMap<K, V>, D::Error>
where
    K: Deserialize<'de> + Ord + Clone,
    V: Deserialize<'de> + Clone,
    D: Deserializer<'de>,
{
    let pairs = Vec::<(K, V)>::deserialize(deserializer)?;
    Ok(pairs.into_iter().collect())
}
