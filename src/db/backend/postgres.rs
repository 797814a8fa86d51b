use postgres::{Client, NoTls};
use tracing::{debug, info};
use crate::config::Config;
use crate::db::backend::{Driver, DriverError};
use crate::db::ddl;

pub struct PostgresDriver {
    pub(crate) database: String,
    pub(crate) client: Client,
}

impl PostgresDriver {
    /// Creates the target database when missing, connects to it and enables
    /// the uuid extension. Any failure here aborts provisioning.
    pub fn connect(config: &Config) -> Result<Self, DriverError> {
        ensure_database(config)?;

        let mut client = connect(config, &config.database)?;
        client.batch_execute(ddl::UUID_EXTENSION)
            .map_err(|source| DriverError::Statement {
                statement: ddl::UUID_EXTENSION.to_owned(),
                source,
            })?;
        info!("enabled uuid extension");

        Ok(Self {
            database: config.database.clone(),
            client,
        })
    }
}

impl Driver for PostgresDriver {
    fn apply(&mut self, statements: &[String]) -> anyhow::Result<()> {
        let mut transaction = self.client.transaction()
            .map_err(DriverError::Transaction)?;
        for statement in statements {
            debug!(database = %self.database, "executing: {statement}");
            transaction.batch_execute(statement)
                .map_err(|source| DriverError::Statement {
                    statement: statement.clone(),
                    source,
                })?;
        }
        // dropping an uncommitted transaction rolls it back
        transaction.commit()
            .map_err(DriverError::Transaction)?;
        Ok(())
    }
}

fn connect(config: &Config, database: &str) -> Result<Client, DriverError> {
    postgres::Config::new()
        .host(&config.host)
        .port(config.port)
        .user(&config.user)
        .password(&config.password)
        .dbname(database)
        .connect(NoTls)
        .map_err(|source| DriverError::Connect {
            host: config.host.clone(),
            port: config.port,
            database: database.to_owned(),
            source,
        })
}

/// Returns whether the database had to be created.
fn ensure_database(config: &Config) -> Result<bool, DriverError> {
    let mut client = connect(config, ddl::MAINTENANCE_DATABASE)?;

    let exists = client
        .query_opt("SELECT 1 FROM pg_database WHERE datname = $1", &[&config.database])
        .map_err(DriverError::Transaction)?
        .is_some();
    if exists {
        info!(database = %config.database, "database already exists");
        return Ok(false);
    }

    let statement = ddl::create_database(&config.database, &config.user);
    debug!("executing: {statement}");
    client.batch_execute(&statement)
        .map_err(|source| DriverError::Statement {
            statement,
            source,
        })?;
    info!(database = %config.database, "created database");
    Ok(true)
}
