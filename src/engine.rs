//! Environment and database handles owning live engine configuration.

use crate::config::{DatabaseConfig, EnvironmentConfig};
use crate::error::{Error, Result};
use crate::params;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Open engine environment rooted at a home directory.
#[derive(Clone, Debug)]
pub struct Environment {
    inner: Arc<EnvironmentState>,
}

/// Builder used to configure an environment before opening it.
#[derive(Clone, Debug)]
pub struct EnvironmentBuilder {
    home: PathBuf,
    config: EnvironmentConfig,
}

#[derive(Debug)]
struct EnvironmentState {
    home: PathBuf,
    config: RwLock<EnvironmentConfig>,
    databases: RwLock<BTreeMap<String, DatabaseConfig>>,
    closed: AtomicBool,
}

/// Handle to one logical database inside an environment.
#[derive(Clone, Debug)]
pub struct Database {
    name: Arc<str>,
    config: Arc<DatabaseConfig>,
    environment: Environment,
    closed: Arc<AtomicBool>,
}

impl Environment {
    /// Opens the environment with the provided configuration.
    pub fn open(home: impl AsRef<Path>, config: EnvironmentConfig) -> Result<Self> {
        EnvironmentBuilder::new(home).config(config).build()
    }

    /// Returns a builder starting from the default configuration.
    pub fn builder(home: impl AsRef<Path>) -> EnvironmentBuilder {
        EnvironmentBuilder::new(home)
    }

    pub fn home(&self) -> &Path {
        &self.inner.home
    }

    /// Returns a snapshot of the environment configuration.
    pub fn config(&self) -> Result<EnvironmentConfig> {
        self.ensure_open()?;
        Ok(self.inner.config.read().clone())
    }

    /// Opens or creates a database, resolving inherited settings against the
    /// environment.
    pub fn open_database(&self, name: &str, config: &DatabaseConfig) -> Result<Database> {
        self.ensure_open()?;
        let env_config = self.inner.config.read().clone();
        let mut databases = self.inner.databases.write();

        let created = !databases.contains_key(name);
        let effective = match databases.get(name) {
            Some(existing) => DatabaseConfig {
                allow_create: config.allow_create,
                read_only: config.read_only,
                cache_mode: config.cache_mode,
                ..existing.clone()
            },
            None => {
                if !config.allow_create {
                    return Err(Error::DatabaseNotFound(name.to_owned()));
                }
                if env_config.read_only() {
                    return Err(Error::IncompatibleConfig(
                        "cannot create a database in a read-only environment",
                    ));
                }
                resolve_fan_out(config.clone(), &env_config)
            }
        };

        if effective.transactional && !env_config.transactional() {
            return Err(Error::IncompatibleConfig(
                "transactional database requires a transactional environment",
            ));
        }
        if effective.transactional && effective.deferred_write {
            return Err(Error::IncompatibleConfig(
                "deferred write and transactional are mutually exclusive",
            ));
        }
        // Only registered once every check has passed.
        if created {
            databases.insert(name.to_owned(), effective.clone());
        }

        debug!(database = name, read_only = effective.read_only, "database opened");
        Ok(Database {
            name: Arc::from(name),
            config: Arc::new(effective),
            environment: self.clone(),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Closes the environment; every handle derived from it becomes unusable.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            info!(home = %self.inner.home.display(), "environment closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(Error::Closed("environment"))
        } else {
            Ok(())
        }
    }
}

impl EnvironmentBuilder {
    pub fn new(home: impl AsRef<Path>) -> Self {
        Self {
            home: home.as_ref().to_path_buf(),
            config: EnvironmentConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: EnvironmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn allow_create(mut self, allow_create: bool) -> Self {
        self.config.set_allow_create(allow_create);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config.set_read_only(read_only);
        self
    }

    pub fn transactional(mut self, transactional: bool) -> Self {
        self.config.set_transactional(transactional);
        self
    }

    /// Opens the environment, creating the home directory when allowed.
    pub fn build(self) -> Result<Environment> {
        if !self.home.is_dir() {
            if !self.config.allow_create() {
                return Err(Error::HomeNotFound(self.home));
            }
            std::fs::create_dir_all(&self.home)?;
        }
        info!(
            home = %self.home.display(),
            read_only = self.config.read_only(),
            cache_size = self.config.cache_size(),
            cache_percent = self.config.cache_percent(),
            "environment opened"
        );
        Ok(Environment {
            inner: Arc::new(EnvironmentState {
                home: self.home,
                config: RwLock::new(self.config),
                databases: RwLock::new(BTreeMap::new()),
                closed: AtomicBool::new(false),
            }),
        })
    }
}

impl Database {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the effective configuration of this database.
    pub fn config(&self) -> Result<DatabaseConfig> {
        self.ensure_open()?;
        Ok(self.config.as_ref().clone())
    }

    /// Returns the environment that owns this database.
    pub fn environment(&self) -> Result<Environment> {
        self.ensure_open()?;
        Ok(self.environment.clone())
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed("database"));
        }
        self.environment.ensure_open()
    }
}

fn resolve_fan_out(mut config: DatabaseConfig, env: &EnvironmentConfig) -> DatabaseConfig {
    if config.node_max_entries == 0 {
        config.node_max_entries = fan_out(env, &params::NODE_MAX_ENTRIES);
    }
    if config.node_max_dup_tree_entries == 0 {
        config.node_max_dup_tree_entries = fan_out(env, &params::NODE_DUP_TREE_MAX_ENTRIES);
    }
    config
}

fn fan_out(env: &EnvironmentConfig, param: &'static params::ConfigParam) -> u32 {
    u32::try_from(env.int(param)).unwrap_or_default()
}
