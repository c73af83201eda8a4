//! Catalog schema definitions.
//!
//! These types map directly to the YAML catalog. Tag and check tables keep
//! the order they are written in.

use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

use super::probe::Probe;
use crate::checks::Message;

/// A catalog of tags and checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
    /// Tag definitions, in file order. Values are validated on conversion.
    #[serde(deserialize_with = "ordered_map")]
    pub tags: Vec<(String, Value)>,

    /// Check definitions, in file order.
    #[serde(deserialize_with = "ordered_map")]
    pub checks: Vec<(String, CheckSpec)>,

    /// Directory relative `file_exists` probes resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// A check as written in a catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckSpec {
    /// How the check decides pass or fail.
    pub probe: Probe,

    /// Messages shown when the check fails.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Deserialize a mapping into key/value pairs, keeping document order.
///
/// A key that repeats replaces the earlier value in its original position.
fn ordered_map<'de, D, T>(deserializer: D) -> std::result::Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OrderedVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping")
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries: Vec<(String, T)> = Vec::new();
            while let Some((key, value)) = map.next_entry::<String, T>()? {
                match entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => entries.push((key, value)),
                }
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(OrderedVisitor(PhantomData))
}
