//! Structured key-value diagnostics attached to reasons.
//!
//! [`Info`] keeps entries in insertion order and behaves like a dictionary
//! update: inserting an existing key replaces its value in place.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{info, Info, InfoValue};
//!
//! let mut info = info! { "path" => "/tmp/cache", "retries" => 3 };
//! info.insert("retries", 4);
//!
//! assert_eq!(info.len(), 2);
//! assert_eq!(info.get("retries"), Some(&InfoValue::Int(4)));
//! assert_eq!(info.to_string(), r#"{path: "/tmp/cache", retries: 4}"#);
//! ```
use core::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A single diagnostic value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl InfoValue {
    /// Returns the text payload, if this is a [`InfoValue::Text`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value:?}"),
        }
    }
}

macro_rules! impl_from_info_value {
    ($($source:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$source> for InfoValue {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

impl_from_info_value! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Text as String,
    &str => Text as String,
}

impl From<usize> for InfoValue {
    #[inline]
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<&String> for InfoValue {
    #[inline]
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// Insertion-ordered mapping from keys to [`InfoValue`]s.
///
/// Backed by a `SmallVec`, so the handful of entries a typical reason carries
/// never touch the heap for the table itself.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    entries: SmallVec<[(String, InfoValue); 4]>,
}

impl Info {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, replacing (in place) any previous value.
    ///
    /// Returns the replaced value, if any.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<InfoValue>
    where
        K: Into<String>,
        V: Into<InfoValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            },
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[inline]
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<InfoValue>,
    {
        self.insert(key, value);
        self
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InfoValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Applies every entry of `other` on top of `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &Info) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Returns `true` if every entry of `self` is present in `other` with an equal value.
    pub fn is_subset_of(&self, other: &Info) -> bool {
        self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V> Extend<(K, V)> for Info
where
    K: Into<String>,
    V: Into<InfoValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Info
where
    K: Into<String>,
    V: Into<InfoValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut info = Info::new();
        info.extend(iter);
        info
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Info
where
    K: Into<String>,
    V: Into<InfoValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Info {
    type Item = (String, InfoValue);
    type IntoIter = smallvec::IntoIter<[(String, InfoValue); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
