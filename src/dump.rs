//! Diagnostic snapshot of a database's live configuration.

use crate::engine::Database;
use crate::error::Result;
use crate::params;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// One reported setting value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(value) => write!(f, "{value}"),
            ConfigValue::Int(value) => write!(f, "{value}"),
            ConfigValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<u32> for ConfigValue {
    fn from(value: u32) -> Self {
        ConfigValue::Int(value.into())
    }
}

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        ConfigValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

/// Key-sorted snapshot of database and environment settings.
pub type StateSnapshot = BTreeMap<&'static str, ConfigValue>;

/// Reads the effective configuration of `db` and its environment.
pub fn dump_state(db: &Database) -> Result<StateSnapshot> {
    let dc = db.config()?;
    let ec = db.environment()?.config()?;

    let mut state = StateSnapshot::new();
    state.insert("cacheMode", dc.cache_mode.to_string().into());
    state.insert("deferredWrite", dc.deferred_write.into());
    state.insert("keyPrefix", dc.key_prefixing.into());
    state.insert("nodeMax", dc.node_max_entries.into());
    state.insert("nodeMaxDup", dc.node_max_dup_tree_entries.into());
    state.insert("cachePercent", ec.cache_percent().into());
    state.insert("cacheSize", ec.cache_size().into());
    state.insert("durability", ec.durability().to_string().into());
    state.insert("readOnly", ec.read_only().into());
    state.insert("sharedCache", ec.shared_cache().into());
    state.insert("transactional", ec.transactional().into());
    state.insert(
        "logUtilization",
        ec.config_param(params::CLEANER_MIN_UTILIZATION.name)?.into(),
    );
    state.insert(
        "logFileUtilization",
        ec.config_param(params::CLEANER_MIN_FILE_UTILIZATION.name)?.into(),
    );
    Ok(state)
}

/// Renders the snapshot as `[key=value]` tokens, for log lines.
pub fn dump_debug(db: &Database) -> Result<String> {
    Ok(render_state(&dump_state(db)?))
}

pub fn render_state(state: &StateSnapshot) -> String {
    let mut out = String::new();
    for (key, value) in state {
        // Writing into a String cannot fail.
        let _ = write!(out, "[{key}={value}]");
    }
    out
}
