use crabkv_settings::{
    DatabaseConfig, Environment, EnvironmentConfig, Error, MapSettings, Result, SystemProperties,
    dump_debug, merge_process_properties, merge_system_properties, params, supported_keys,
    update_database_config, update_environment_config,
};
use std::env;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    let command = args.remove(0);
    match command.as_str() {
        "keys" => cmd_keys(args),
        "params" => cmd_params(args),
        "dump" => cmd_dump(args),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => Err(invalid_input(format!("unknown command `{other}`"))),
    }
}

fn print_usage() {
    println!("CrabKv settings");
    println!("Usage:");
    println!("  crabkv-settings keys");
    println!("  crabkv-settings params");
    println!("  crabkv-settings dump <database> [--settings <file>] [-D<name>=<value>]...");
    println!("Environment overrides: CRABKV_HOME, CRABKV_SETTINGS, je.* variables");
}

fn cmd_keys(args: Vec<String>) -> Result<()> {
    ensure_no_flags(&args)?;
    for key in supported_keys() {
        println!("{key}");
    }
    Ok(())
}

fn cmd_params(args: Vec<String>) -> Result<()> {
    ensure_no_flags(&args)?;
    for param in params::ALL.iter() {
        println!("{}={}", param.name, param.default);
    }
    Ok(())
}

fn cmd_dump(args: Vec<String>) -> Result<()> {
    let (defines, mut args) = SystemProperties::from_args(args);
    if args.is_empty() {
        return Err(invalid_input("missing database name"));
    }
    let database = args.remove(0);

    let mut settings_path = env::var_os("CRABKV_SETTINGS").map(PathBuf::from);
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--settings" => {
                index += 1;
                let value = args
                    .get(index)
                    .ok_or_else(|| invalid_input("--settings requires a value"))?;
                settings_path = Some(PathBuf::from(value));
            }
            flag => return Err(invalid_input(format!("unknown option `{flag}`"))),
        }
        index += 1;
    }

    let settings = match settings_path {
        Some(path) => MapSettings::load(path)?,
        None => MapSettings::new(),
    };

    let mut env_config = EnvironmentConfig::new();
    env_config.set_allow_create(true);
    update_environment_config(&settings, &mut env_config)?;

    merge_process_properties(&mut env_config)?;
    merge_system_properties(&defines, &mut env_config)?;

    let environment = Environment::open(home_directory(), env_config)?;
    let mut db_config = DatabaseConfig::new();
    db_config.allow_create = !environment.config()?.read_only();
    update_database_config(&settings, &mut db_config);

    let db = environment.open_database(&database, &db_config)?;
    println!("{}", dump_debug(&db)?);
    db.close();
    environment.close();
    Ok(())
}

fn ensure_no_flags(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Ok(());
    }
    Err(invalid_input(format!(
        "unexpected arguments: {}",
        args.join(" ")
    )))
}

fn home_directory() -> PathBuf {
    env::var("CRABKV_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn invalid_input(message: impl Into<String>) -> Error {
    Error::Io(io::Error::new(io::ErrorKind::InvalidInput, message.into()))
}
