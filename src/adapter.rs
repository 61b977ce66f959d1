//! Translates `cs.je.*` settings onto engine configuration objects.

use crate::config::{DatabaseConfig, EnvironmentConfig};
use crate::error::{Error, Result};
use crate::params;
use crate::settings::{Settings, parse_number};
use tracing::debug;

pub const JE_READ_ONLY: &str = "cs.je.readOnly";
pub const JE_CACHE_SIZE: &str = "cs.je.cacheSize";
pub const JE_DEFERRED_WRITE: &str = "cs.je.deferredWrite";
pub const JE_LOG_MIN_USED: &str = "cs.je.logMinUsed";
pub const JE_LOG_FILE_MIN_USED: &str = "cs.je.logFileMinUsed";

const SUPPORTED_KEYS: [&str; 5] = [
    JE_READ_ONLY,
    JE_CACHE_SIZE,
    JE_DEFERRED_WRITE,
    JE_LOG_MIN_USED,
    JE_LOG_FILE_MIN_USED,
];

/// Settings keys this adapter acts on.
pub fn supported_keys() -> &'static [&'static str] {
    &SUPPORTED_KEYS
}

/// Applies the environment-scoped settings.
///
/// Keys are applied in a fixed order and the first failure is returned; keys
/// applied before it stay applied.
pub fn update_environment_config<S>(settings: &S, config: &mut EnvironmentConfig) -> Result<()>
where
    S: Settings + ?Sized,
{
    if settings.has_value(JE_READ_ONLY) {
        let read_only = settings.is_true(JE_READ_ONLY);
        config.set_read_only(read_only);
        debug!(key = JE_READ_ONLY, read_only, "applied setting");
    }

    if let Some(cache_size) = settings.value(JE_CACHE_SIZE) {
        apply_cache_size(cache_size, config)?;
    }

    for (key, param) in [
        (JE_LOG_MIN_USED, &params::CLEANER_MIN_UTILIZATION),
        (JE_LOG_FILE_MIN_USED, &params::CLEANER_MIN_FILE_UTILIZATION),
    ] {
        if let Some(value) = settings.value(key) {
            config.set_config_param(param.name, value)?;
            debug!(key, param = param.name, value, "applied setting");
        }
    }

    Ok(())
}

/// Applies the database-scoped settings.
pub fn update_database_config<S>(settings: &S, config: &mut DatabaseConfig)
where
    S: Settings + ?Sized,
{
    if settings.has_value(JE_DEFERRED_WRITE) {
        config.deferred_write = settings.is_true(JE_DEFERRED_WRITE);
        debug!(
            key = JE_DEFERRED_WRITE,
            deferred_write = config.deferred_write,
            "applied setting"
        );
    }
}

fn apply_cache_size(value: &str, config: &mut EnvironmentConfig) -> Result<()> {
    if let Some(percent) = value.strip_suffix('%') {
        let percent: u32 = percent
            .parse()
            .map_err(|_| Error::InvalidNumber(value.to_owned()))?;
        config.set_cache_percent(percent)?;
        debug!(key = JE_CACHE_SIZE, percent, "applied setting");
    } else {
        let bytes = parse_number(value)?;
        config.set_cache_size(bytes)?;
        debug!(key = JE_CACHE_SIZE, bytes, "applied setting");
    }
    Ok(())
}
