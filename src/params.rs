//! Named configuration parameters understood by the storage engine.
//!
//! Every environment setting is ultimately one of these parameters. Typed
//! setters on [`EnvironmentConfig`](crate::config::EnvironmentConfig) and the
//! generic `set_config_param` both validate through this table.

use crate::config::Durability;
use crate::error::{Error, Result};
use std::fmt;

const NAME_PREFIX: &str = "je.";

/// Value domain of a parameter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamKind {
    Bool,
    Int { min: i64, max: i64 },
    Durability,
}

/// Validated parameter value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Durability(Durability),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(value) => write!(f, "{value}"),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Durability(value) => write!(f, "{value}"),
        }
    }
}

/// Schema entry for one engine parameter.
#[derive(Debug)]
pub struct ConfigParam {
    /// Canonical name, always starting with `je.`.
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
}

impl ConfigParam {
    /// Parses and range-checks a raw value for this parameter.
    pub fn parse(&self, raw: &str) -> Result<ParamValue> {
        let trimmed = raw.trim();
        match self.kind {
            ParamKind::Bool => {
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(ParamValue::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(ParamValue::Bool(false))
                } else {
                    Err(self.illegal(raw, "expected true or false"))
                }
            }
            ParamKind::Int { min, max } => {
                let value = self.parse_int(raw)?;
                if value < min || value > max {
                    return Err(self.illegal(raw, format!("must be between {min} and {max}")));
                }
                Ok(ParamValue::Int(value))
            }
            ParamKind::Durability => trimmed
                .parse::<Durability>()
                .map(ParamValue::Durability)
                .map_err(|_| self.illegal(raw, "expected SYNC, WRITE_NO_SYNC or NO_SYNC")),
        }
    }

    fn parse_int(&self, raw: &str) -> Result<i64> {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| self.illegal(raw, "not an integer"))
    }

    fn illegal(&self, raw: &str, reason: impl Into<String>) -> Error {
        Error::IllegalParam {
            name: self.name,
            value: raw.to_owned(),
            reason: reason.into(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.name.strip_prefix(NAME_PREFIX) == Some(name)
    }
}

pub static MAX_MEMORY: ConfigParam = ConfigParam {
    name: "je.maxMemory",
    kind: ParamKind::Int {
        min: 0,
        max: i64::MAX,
    },
    default: ParamValue::Int(0),
};

pub static MAX_MEMORY_PERCENT: ConfigParam = ConfigParam {
    name: "je.maxMemoryPercent",
    kind: ParamKind::Int { min: 1, max: 90 },
    default: ParamValue::Int(60),
};

pub static SHARED_CACHE: ConfigParam = ConfigParam {
    name: "je.sharedCache",
    kind: ParamKind::Bool,
    default: ParamValue::Bool(false),
};

pub static ENV_READ_ONLY: ConfigParam = ConfigParam {
    name: "je.env.isReadOnly",
    kind: ParamKind::Bool,
    default: ParamValue::Bool(false),
};

pub static ENV_IS_TRANSACTIONAL: ConfigParam = ConfigParam {
    name: "je.env.isTransactional",
    kind: ParamKind::Bool,
    default: ParamValue::Bool(false),
};

pub static TXN_DURABILITY: ConfigParam = ConfigParam {
    name: "je.txn.durability",
    kind: ParamKind::Durability,
    default: ParamValue::Durability(Durability::Sync),
};

pub static CLEANER_MIN_UTILIZATION: ConfigParam = ConfigParam {
    name: "je.cleaner.minUtilization",
    kind: ParamKind::Int { min: 0, max: 90 },
    default: ParamValue::Int(50),
};

pub static CLEANER_MIN_FILE_UTILIZATION: ConfigParam = ConfigParam {
    name: "je.cleaner.minFileUtilization",
    kind: ParamKind::Int { min: 0, max: 50 },
    default: ParamValue::Int(5),
};

pub static CLEANER_THREADS: ConfigParam = ConfigParam {
    name: "je.cleaner.threads",
    kind: ParamKind::Int { min: 1, max: 64 },
    default: ParamValue::Int(1),
};

pub static LOG_FILE_MAX: ConfigParam = ConfigParam {
    name: "je.log.fileMax",
    kind: ParamKind::Int {
        min: 1_000_000,
        max: 1 << 30,
    },
    default: ParamValue::Int(10_000_000),
};

pub static CHECKPOINTER_BYTES_INTERVAL: ConfigParam = ConfigParam {
    name: "je.checkpointer.bytesInterval",
    kind: ParamKind::Int {
        min: 0,
        max: i64::MAX,
    },
    default: ParamValue::Int(20_000_000),
};

pub static NODE_MAX_ENTRIES: ConfigParam = ConfigParam {
    name: "je.nodeMaxEntries",
    kind: ParamKind::Int { min: 4, max: 32767 },
    default: ParamValue::Int(128),
};

pub static NODE_DUP_TREE_MAX_ENTRIES: ConfigParam = ConfigParam {
    name: "je.nodeDupTreeMaxEntries",
    kind: ParamKind::Int { min: 4, max: 32767 },
    default: ParamValue::Int(128),
};

/// Every parameter the engine recognizes.
pub static ALL: [&ConfigParam; 13] = [
    &MAX_MEMORY,
    &MAX_MEMORY_PERCENT,
    &SHARED_CACHE,
    &ENV_READ_ONLY,
    &ENV_IS_TRANSACTIONAL,
    &TXN_DURABILITY,
    &CLEANER_MIN_UTILIZATION,
    &CLEANER_MIN_FILE_UTILIZATION,
    &CLEANER_THREADS,
    &LOG_FILE_MAX,
    &CHECKPOINTER_BYTES_INTERVAL,
    &NODE_MAX_ENTRIES,
    &NODE_DUP_TREE_MAX_ENTRIES,
];

/// Finds a parameter by name; the `je.` prefix is optional.
pub fn lookup(name: &str) -> Result<&'static ConfigParam> {
    ALL.iter()
        .copied()
        .find(|param| param.matches(name))
        .ok_or_else(|| Error::UnknownParam(name.to_owned()))
}
