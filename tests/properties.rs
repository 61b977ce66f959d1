use crabkv_settings::{
    EnvironmentConfig, Error, Result, SystemProperties, merge_process_properties,
    merge_system_properties,
};

#[test]
fn je_properties_are_forwarded_with_audit() -> Result<()> {
    let properties: SystemProperties = [
        ("je.maxMemory", "100000000"),
        ("je.cleaner.threads", "4"),
        ("PATH", "/usr/bin"),
        ("java.home", "/opt/jdk"),
    ]
    .into_iter()
    .collect();

    let mut env = EnvironmentConfig::new();
    let audit = merge_system_properties(&properties, &mut env)?;

    assert_eq!(env.config_param("maxMemory")?, "100000000");
    assert_eq!(env.cache_size(), 100_000_000);
    assert_eq!(env.config_param("je.cleaner.threads")?, "4");
    assert!(audit.contains("je.maxMemory=100000000"));
    assert!(audit.contains("je.cleaner.threads=4"));
    assert!(!audit.contains("PATH"));
    assert!(!audit.contains("java.home"));
    Ok(())
}

#[test]
fn raw_value_reaches_generic_parameter() -> Result<()> {
    let mut properties = SystemProperties::new();
    properties.insert("je.maxMemory", "100");
    let mut env = EnvironmentConfig::new();
    let audit = merge_system_properties(&properties, &mut env)?;

    assert_eq!(env.config_param("maxMemory")?, "100");
    assert!(audit.contains("je.maxMemory=100"));
    Ok(())
}

#[test]
fn merge_order_is_key_order() -> Result<()> {
    let properties: SystemProperties = [
        ("je.sharedCache", "true"),
        ("je.env.isTransactional", "true"),
        ("je.maxMemoryPercent", "30"),
    ]
    .into_iter()
    .collect();

    let mut env = EnvironmentConfig::new();
    let audit = merge_system_properties(&properties, &mut env)?;
    assert_eq!(
        audit,
        "je.env.isTransactional=true je.maxMemoryPercent=30 je.sharedCache=true"
    );
    assert!(env.shared_cache());
    assert!(env.transactional());
    assert_eq!(env.cache_percent(), 30);
    Ok(())
}

#[test]
fn no_engine_properties_is_a_no_op() -> Result<()> {
    let properties: SystemProperties = [("HOME", "/root")].into_iter().collect();
    let mut env = EnvironmentConfig::new();
    let audit = merge_system_properties(&properties, &mut env)?;
    assert!(audit.is_empty());
    assert_eq!(env, EnvironmentConfig::default());
    Ok(())
}

#[test]
fn unknown_engine_property_fails() {
    let properties: SystemProperties = [("je.bogus.setting", "1")].into_iter().collect();
    let mut env = EnvironmentConfig::new();
    let err = merge_system_properties(&properties, &mut env).unwrap_err();
    assert!(matches!(err, Error::UnknownParam(ref name) if name == "je.bogus.setting"));
}

#[test]
fn define_flags_are_split_from_arguments() {
    let args = ["mydb", "-Dje.maxMemory=100", "--settings", "a.properties", "-Dnovalue"]
        .into_iter()
        .map(String::from);
    let (defines, rest) = SystemProperties::from_args(args);

    assert_eq!(defines.get("je.maxMemory"), Some("100"));
    assert_eq!(rest, ["mydb", "--settings", "a.properties", "-Dnovalue"]);
}

#[test]
fn process_environment_is_captured() -> Result<()> {
    let properties = SystemProperties::from_env();
    assert_eq!(
        properties.get("CARGO_MANIFEST_DIR"),
        Some(env!("CARGO_MANIFEST_DIR"))
    );

    let mut env = EnvironmentConfig::new();
    let audit = merge_process_properties(&mut env)?;
    let expected: Vec<String> = properties
        .iter()
        .filter(|(key, _)| key.starts_with("je."))
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    assert_eq!(audit, expected.join(" "));
    Ok(())
}
