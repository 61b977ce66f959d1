//! Process-wide `je.*` properties forwarded straight to the engine.

use crate::config::EnvironmentConfig;
use crate::error::Result;
use std::collections::BTreeMap;
use std::env;
use tracing::{debug, info};

/// Prefix marking a property as a raw engine parameter.
pub const ENGINE_PREFIX: &str = "je.";

const DEFINE_FLAG: &str = "-D";

/// Ordered set of string properties.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SystemProperties {
    values: BTreeMap<String, String>,
}

impl SystemProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the process environment, skipping non-Unicode entries.
    pub fn from_env() -> Self {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Collects `-Dname=value` flags, returning the remaining arguments untouched.
    pub fn from_args<I>(args: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = String>,
    {
        let mut properties = Self::new();
        let mut rest = Vec::new();
        for arg in args {
            match arg
                .strip_prefix(DEFINE_FLAG)
                .and_then(|define| define.split_once('='))
            {
                Some((key, value)) if !key.is_empty() => {
                    properties.insert(key, value);
                }
                _ => rest.push(arg),
            }
        }
        (properties, rest)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterates properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SystemProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        properties.extend(iter);
        properties
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for SystemProperties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Forwards every `je.*` property to the engine in key order and returns a
/// space-separated `key=value` record of what was applied.
pub fn merge_system_properties(
    properties: &SystemProperties,
    config: &mut EnvironmentConfig,
) -> Result<String> {
    let mut applied = Vec::new();
    for (key, value) in properties
        .iter()
        .filter(|(key, _)| key.starts_with(ENGINE_PREFIX))
    {
        config.set_config_param(key, value)?;
        debug!(param = key, value, "merged system property");
        applied.push(format!("{key}={value}"));
    }
    let audit = applied.join(" ");
    if !audit.is_empty() {
        info!(properties = %audit, "merged engine properties");
    }
    Ok(audit)
}

/// Same as [`merge_system_properties`] over the current process environment.
pub fn merge_process_properties(config: &mut EnvironmentConfig) -> Result<String> {
    merge_system_properties(&SystemProperties::from_env(), config)
}
