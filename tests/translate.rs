use crabkv_settings::adapter::{
    JE_CACHE_SIZE, JE_DEFERRED_WRITE, JE_LOG_FILE_MIN_USED, JE_LOG_MIN_USED, JE_READ_ONLY,
};
use crabkv_settings::{
    DatabaseConfig, EnvironmentConfig, Error, MapSettings, Result, supported_keys,
    update_database_config, update_environment_config,
};
use std::collections::HashMap;

#[test]
fn unrecognized_keys_leave_defaults() -> Result<()> {
    let settings = MapSettings::new()
        .with("cs.je.somethingElse", "true")
        .with("cs.other.cacheSize", "10%")
        .with("je.maxMemory", "1000000");

    let mut env = EnvironmentConfig::new();
    update_environment_config(&settings, &mut env)?;
    assert_eq!(env, EnvironmentConfig::default());

    let mut db = DatabaseConfig::new();
    update_database_config(&settings, &mut db);
    assert_eq!(db, DatabaseConfig::default());
    Ok(())
}

#[test]
fn cache_percent_leaves_absolute_size() -> Result<()> {
    let settings = MapSettings::new().with(JE_CACHE_SIZE, "50%");
    let mut env = EnvironmentConfig::new();
    update_environment_config(&settings, &mut env)?;

    assert_eq!(env.cache_percent(), 50);
    assert_eq!(env.cache_size(), EnvironmentConfig::default().cache_size());
    Ok(())
}

#[test]
fn absolute_cache_size_leaves_percent() -> Result<()> {
    let settings = MapSettings::new().with(JE_CACHE_SIZE, "256MB");
    let mut env = EnvironmentConfig::new();
    update_environment_config(&settings, &mut env)?;

    assert_eq!(env.cache_size(), 256 * 1024 * 1024);
    assert_eq!(env.cache_percent(), EnvironmentConfig::default().cache_percent());
    Ok(())
}

#[test]
fn malformed_cache_size_fails() {
    for value in ["abc", "12.5%", "%", "ten%", "64XB"] {
        let settings = MapSettings::new().with(JE_CACHE_SIZE, value);
        let mut env = EnvironmentConfig::new();
        let err = update_environment_config(&settings, &mut env).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber(ref v) if v == value), "{value}: {err}");
        assert_eq!(env, EnvironmentConfig::default());
    }
}

#[test]
fn out_of_range_cache_values_are_engine_errors() {
    let mut env = EnvironmentConfig::new();
    let settings = MapSettings::new().with(JE_CACHE_SIZE, "95%");
    assert!(matches!(
        update_environment_config(&settings, &mut env),
        Err(Error::IllegalParam { name: "je.maxMemoryPercent", .. })
    ));

    let settings = MapSettings::new().with(JE_CACHE_SIZE, "8388608T");
    assert!(matches!(
        update_environment_config(&settings, &mut env),
        Err(Error::IllegalParam { name: "je.maxMemory", ref reason, .. })
            if reason.starts_with("must be between 0 and")
    ));

    let settings = MapSettings::new().with(JE_CACHE_SIZE, "0%");
    assert!(matches!(
        update_environment_config(&settings, &mut env),
        Err(Error::IllegalParam { name: "je.maxMemoryPercent", .. })
    ));
    assert_eq!(env, EnvironmentConfig::default());
}

#[test]
fn read_only_truthiness_is_idempotent() -> Result<()> {
    let mut env = EnvironmentConfig::new();
    for value in ["true", "yes", "1", "ON"] {
        let settings = MapSettings::new().with(JE_READ_ONLY, value);
        update_environment_config(&settings, &mut env)?;
        assert!(env.read_only(), "{value}");
        update_environment_config(&settings, &mut env)?;
        assert!(env.read_only(), "{value} applied twice");
    }
    for value in ["false", "no", "0", ""] {
        let settings = MapSettings::new().with(JE_READ_ONLY, value);
        update_environment_config(&settings, &mut env)?;
        assert!(!env.read_only(), "{value}");
    }
    Ok(())
}

#[test]
fn deferred_write_only_touches_database_config() -> Result<()> {
    let settings = MapSettings::new().with(JE_DEFERRED_WRITE, "yes");
    let mut env = EnvironmentConfig::new();
    let mut db = DatabaseConfig::new();

    update_environment_config(&settings, &mut env)?;
    update_database_config(&settings, &mut db);

    assert!(db.deferred_write);
    assert_eq!(env, EnvironmentConfig::default());
    assert_eq!(
        db,
        DatabaseConfig {
            deferred_write: true,
            ..DatabaseConfig::default()
        }
    );
    Ok(())
}

#[test]
fn log_utilization_is_forwarded_to_cleaner_params() -> Result<()> {
    let settings: HashMap<String, String> = [
        (JE_LOG_MIN_USED.to_string(), "65".to_string()),
        (JE_LOG_FILE_MIN_USED.to_string(), "20".to_string()),
    ]
    .into_iter()
    .collect();
    let mut env = EnvironmentConfig::new();
    update_environment_config(&settings, &mut env)?;

    assert_eq!(env.config_param("je.cleaner.minUtilization")?, "65");
    assert_eq!(env.config_param("cleaner.minFileUtilization")?, "20");
    Ok(())
}

#[test]
fn illegal_log_utilization_surfaces_engine_error() {
    let settings = MapSettings::new()
        .with(JE_READ_ONLY, "true")
        .with(JE_LOG_MIN_USED, "95");
    let mut env = EnvironmentConfig::new();
    let err = update_environment_config(&settings, &mut env).unwrap_err();

    assert!(matches!(
        err,
        Error::IllegalParam { name: "je.cleaner.minUtilization", ref value, .. } if value == "95"
    ));
    // Keys ahead of the failing one were already applied.
    assert!(env.read_only());
}

#[test]
fn supported_keys_cover_every_handled_key() {
    let keys = supported_keys();
    assert_eq!(keys.len(), 5);
    for key in [
        JE_READ_ONLY,
        JE_CACHE_SIZE,
        JE_DEFERRED_WRITE,
        JE_LOG_MIN_USED,
        JE_LOG_FILE_MIN_USED,
    ] {
        assert!(keys.contains(&key), "{key}");
    }
}

#[test]
fn settings_can_come_from_a_properties_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("store.properties");
    std::fs::write(
        &path,
        "# cache tuning\ncs.je.cacheSize=1G\ncs.je.readOnly = no\ncs.je.deferredWrite: true\n",
    )?;

    let settings = MapSettings::load(&path)?;
    let mut env = EnvironmentConfig::new();
    let mut db = DatabaseConfig::new();
    update_environment_config(&settings, &mut env)?;
    update_database_config(&settings, &mut db);

    assert_eq!(env.cache_size(), 1 << 30);
    assert!(!env.read_only());
    assert!(db.deferred_write);
    Ok(())
}
