use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use serde_derive::Deserialize;

pub mod error;

pub use error::ConfigError;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "wp2pg.ron";

/// Connection settings for the target PostgreSQL server.
///
/// Loaded from a RON file, every key optional:
///
/// ```ron
/// (
///     host: "db.internal",
///     port: 5432,
///     user: "postgres",
///     password: "secret",
///     database: "gisgate",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: String::new(),
            database: "wp2pg".to_owned(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|error| ConfigError::Read {
                path: path.to_path_buf(),
                error,
            })?;
        ron::from_str(&content)
            .map_err(|error| ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            })
    }

    /// Reads `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, and applies the overrides.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if default_path.is_file() => Self::from_file(&default_path)?,
            None => Self::default(),
        };

        let config = config.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(user) = overrides.user {
            self.user = user;
        }
        if let Some(password) = overrides.password {
            self.password = password;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [("host", &self.host), ("user", &self.user), ("database", &self.database)];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::missing(key));
            }
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                key: "port".to_owned(),
                message: "must be between 1 and 65535".to_owned(),
            });
        }
        Ok(())
    }
}

/// Connection target without the password, for log lines.
impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}
