use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use crate::config::Overrides;
use crate::extract::{DEFAULT_TABLE, ENROLLED_POST_TYPE};

/// WordPress to PostgreSQL migration tools.
#[derive(Parser, Clone)]
#[command(name = "wp2pg", version, about)]
pub struct CLI {
    /// Log debug output, including every DDL statement
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Extract enrollment records from a MySQL dump into a CSV file
    Extract {
        #[arg(short, long, default_value = "wp_posts.sql")]
        input: PathBuf,
        #[arg(short, long, default_value = "wp_enrollments.csv")]
        output: PathBuf,
        /// Table whose INSERT statements are read
        #[arg(long, default_value = DEFAULT_TABLE)]
        table: String,
        /// post_type value marking an enrollment row
        #[arg(long, default_value = ENROLLED_POST_TYPE)]
        post_type: String,
    },
    /// Create the database, enums, tables, constraints and indexes of a schema file
    Provision {
        #[arg(short, long, default_value = "prisma/schema.prisma")]
        schema: PathBuf,
        /// Print the statements instead of running them
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Parse and validate a schema file
    Check {
        schema: PathBuf,
    },
    /// Print the parsed form of a schema file
    Inspect {
        schema: PathBuf,
    },
}

#[derive(Args, Clone, Debug)]
pub struct ConnectionArgs {
    /// RON file with connection settings, defaults to ./wp2pg.ron when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long, env = "PGHOST")]
    pub host: Option<String>,
    #[arg(long, env = "PGPORT")]
    pub port: Option<u16>,
    #[arg(long, env = "PGUSER")]
    pub user: Option<String>,
    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, env = "PGDATABASE")]
    pub database: Option<String>,
}

impl From<ConnectionArgs> for Overrides {
    fn from(value: ConnectionArgs) -> Self {
        Self {
            host: value.host,
            port: value.port,
            user: value.user,
            password: value.password,
            database: value.database,
        }
    }
}
