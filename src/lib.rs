//! Settings adapter for the CrabKv storage engine configuration surface.

pub mod adapter;
pub mod config;
pub mod dump;
pub mod engine;
pub mod error;
pub mod params;
pub mod properties;
pub mod settings;

pub use adapter::{supported_keys, update_database_config, update_environment_config};
pub use config::{CacheMode, DatabaseConfig, Durability, EnvironmentConfig};
pub use dump::{ConfigValue, dump_debug, dump_state};
pub use engine::{Database, Environment, EnvironmentBuilder};
pub use error::{Error, Result};
pub use properties::{SystemProperties, merge_process_properties, merge_system_properties};
pub use settings::{MapSettings, Settings};
