//! Generic key/value settings store consumed by the engine adapter.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read-only view over namespaced string settings.
pub trait Settings {
    /// Returns the raw value stored under `key`, matched exactly.
    fn value(&self, key: &str) -> Option<&str>;

    fn has_value(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Returns `true` when the key is present with a truthy value.
    fn is_true(&self, key: &str) -> bool {
        self.value(key).is_some_and(is_truthy)
    }
}

impl Settings for BTreeMap<String, String> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl Settings for HashMap<String, String> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Returns whether a settings value spells "on".
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["true", "yes", "on", "1"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}

/// Parses a byte count such as `512`, `64K`, `256MB` or `2g`.
///
/// Suffixes are binary multiples and case-insensitive.
pub fn parse_number(input: &str) -> Result<u64> {
    let invalid = || Error::InvalidNumber(input.to_owned());
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(split);
    if digits.is_empty() {
        return Err(invalid());
    }
    let multiplier: u64 = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => 1 << 10,
        "M" | "MB" => 1 << 20,
        "G" | "GB" => 1 << 30,
        "T" | "TB" => 1 << 40,
        _ => return Err(invalid()),
    };
    let base: u64 = digits.parse().map_err(|_| invalid())?;
    base.checked_mul(multiplier).ok_or_else(invalid)
}

/// In-memory settings store, optionally loaded from a properties file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MapSettings {
    values: BTreeMap<String, String>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value and returns the store, for building fixtures inline.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Stores a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Reads a properties file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses `key=value` / `key: value` lines. Blank lines and lines starting
    /// with `#` or `!` are skipped.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut settings = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            let Some(split) = trimmed.find(['=', ':']) else {
                return Err(Error::MalformedSettings {
                    line: index + 1,
                    text: line.clone(),
                });
            };
            let key = trimmed[..split].trim();
            if key.is_empty() {
                return Err(Error::MalformedSettings {
                    line: index + 1,
                    text: line.clone(),
                });
            }
            settings.insert(key, trimmed[split + 1..].trim());
        }
        Ok(settings)
    }
}

impl Settings for MapSettings {
    fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
