//! Environment and database configuration objects for the storage engine.

use crate::error::{Error, Result};
use crate::params::{self, ConfigParam, ParamValue};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Commit durability applied to transactions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Durability {
    /// Write and fsync the log on commit.
    #[default]
    Sync,
    /// Write the log on commit without fsync.
    WriteNoSync,
    /// Leave the log in memory until the next flush.
    NoSync,
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Durability::Sync => "SYNC",
            Durability::WriteNoSync => "WRITE_NO_SYNC",
            Durability::NoSync => "NO_SYNC",
        })
    }
}

impl FromStr for Durability {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        [Durability::Sync, Durability::WriteNoSync, Durability::NoSync]
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::IllegalParam {
                name: "durability",
                value: input.to_owned(),
                reason: "unknown durability".into(),
            })
    }
}

/// How a database's records interact with the shared cache.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CacheMode {
    #[default]
    Default,
    KeepHot,
    Unchanged,
    EvictLn,
    EvictBin,
    MakeCold,
    Dynamic,
}

impl CacheMode {
    const ALL: [CacheMode; 7] = [
        CacheMode::Default,
        CacheMode::KeepHot,
        CacheMode::Unchanged,
        CacheMode::EvictLn,
        CacheMode::EvictBin,
        CacheMode::MakeCold,
        CacheMode::Dynamic,
    ];
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CacheMode::Default => "DEFAULT",
            CacheMode::KeepHot => "KEEP_HOT",
            CacheMode::Unchanged => "UNCHANGED",
            CacheMode::EvictLn => "EVICT_LN",
            CacheMode::EvictBin => "EVICT_BIN",
            CacheMode::MakeCold => "MAKE_COLD",
            CacheMode::Dynamic => "DYNAMIC",
        })
    }
}

impl FromStr for CacheMode {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        CacheMode::ALL
            .into_iter()
            .find(|mode| mode.to_string().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::IllegalParam {
                name: "cacheMode",
                value: input.to_owned(),
                reason: "unknown cache mode".into(),
            })
    }
}

/// Engine-wide tuning.
///
/// Only explicitly set parameters are stored; everything else reads back as
/// the schema default, so a fresh value compares equal to
/// `EnvironmentConfig::default()`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnvironmentConfig {
    allow_create: bool,
    params: BTreeMap<&'static str, ParamValue>,
}

impl EnvironmentConfig {
    /// Returns a configuration where every parameter has its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets any engine parameter by name. The `je.` prefix is optional.
    pub fn set_config_param(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        let param = params::lookup(name)?;
        let parsed = param.parse(value)?;
        self.params.insert(param.name, parsed);
        Ok(self)
    }

    /// Returns the current value of an engine parameter, rendered as text.
    pub fn config_param(&self, name: &str) -> Result<String> {
        let param = params::lookup(name)?;
        Ok(self.value(param).to_string())
    }

    pub fn set_allow_create(&mut self, allow_create: bool) -> &mut Self {
        self.allow_create = allow_create;
        self
    }

    pub fn allow_create(&self) -> bool {
        self.allow_create
    }

    pub fn set_read_only(&mut self, read_only: bool) -> &mut Self {
        self.set(&params::ENV_READ_ONLY, ParamValue::Bool(read_only))
    }

    pub fn read_only(&self) -> bool {
        self.flag(&params::ENV_READ_ONLY)
    }

    pub fn set_transactional(&mut self, transactional: bool) -> &mut Self {
        self.set(&params::ENV_IS_TRANSACTIONAL, ParamValue::Bool(transactional))
    }

    pub fn transactional(&self) -> bool {
        self.flag(&params::ENV_IS_TRANSACTIONAL)
    }

    pub fn set_shared_cache(&mut self, shared: bool) -> &mut Self {
        self.set(&params::SHARED_CACHE, ParamValue::Bool(shared))
    }

    pub fn shared_cache(&self) -> bool {
        self.flag(&params::SHARED_CACHE)
    }

    pub fn set_durability(&mut self, durability: Durability) -> &mut Self {
        self.set(&params::TXN_DURABILITY, ParamValue::Durability(durability))
    }

    pub fn durability(&self) -> Durability {
        match self.value(&params::TXN_DURABILITY) {
            ParamValue::Durability(durability) => durability,
            _ => Durability::default(),
        }
    }

    /// Sets the absolute cache size in bytes; zero defers to the percentage.
    pub fn set_cache_size(&mut self, bytes: u64) -> Result<&mut Self> {
        let bytes = i64::try_from(bytes).map_err(|_| Error::IllegalParam {
            name: params::MAX_MEMORY.name,
            value: bytes.to_string(),
            reason: format!("must be between 0 and {}", i64::MAX),
        })?;
        Ok(self.set(&params::MAX_MEMORY, ParamValue::Int(bytes)))
    }

    pub fn cache_size(&self) -> u64 {
        u64::try_from(self.int(&params::MAX_MEMORY)).unwrap_or_default()
    }

    /// Sets the cache size as a percentage of available memory.
    pub fn set_cache_percent(&mut self, percent: u32) -> Result<&mut Self> {
        self.set_checked(&params::MAX_MEMORY_PERCENT, &percent.to_string())
    }

    pub fn cache_percent(&self) -> u32 {
        u32::try_from(self.int(&params::MAX_MEMORY_PERCENT)).unwrap_or_default()
    }

    pub(crate) fn int(&self, param: &'static ConfigParam) -> i64 {
        match self.value(param) {
            ParamValue::Int(value) => value,
            _ => 0,
        }
    }

    fn value(&self, param: &'static ConfigParam) -> ParamValue {
        self.params.get(param.name).copied().unwrap_or(param.default)
    }

    fn flag(&self, param: &'static ConfigParam) -> bool {
        matches!(self.value(param), ParamValue::Bool(true))
    }

    fn set(&mut self, param: &'static ConfigParam, value: ParamValue) -> &mut Self {
        self.params.insert(param.name, value);
        self
    }

    fn set_checked(&mut self, param: &'static ConfigParam, raw: &str) -> Result<&mut Self> {
        let parsed = param.parse(raw)?;
        Ok(self.set(param, parsed))
    }
}

/// Settings scoped to a single logical database.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DatabaseConfig {
    /// Create the database when it does not exist yet.
    pub allow_create: bool,
    pub read_only: bool,
    pub transactional: bool,
    /// Buffer writes in memory until an explicit sync or eviction.
    pub deferred_write: bool,
    /// Store common key prefixes once per node.
    pub key_prefixing: bool,
    pub cache_mode: CacheMode,
    /// Maximum entries per tree node; zero inherits the environment default.
    pub node_max_entries: u32,
    /// Maximum entries per duplicate-tree node; zero inherits the environment default.
    pub node_max_dup_tree_entries: u32,
}

impl DatabaseConfig {
    /// Returns a configuration with every flag cleared and fan-out inherited.
    pub fn new() -> Self {
        Self::default()
    }
}
