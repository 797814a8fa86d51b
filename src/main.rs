#![allow(dead_code)]

use std::path::Path;
use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use crate::cli::{CLI, Command, ConnectionArgs};
use crate::config::Config;
use crate::db::backend::{PlanDriver, PostgresDriver};
use crate::db::migrate::migrate;
use crate::db::validate::validate_schema;
use crate::schema::Schema;

mod cli;
mod config;
mod db;
mod extract;
mod parser;
mod schema;

fn main() -> anyhow::Result<()> {
    let cli = <CLI as clap::Parser>::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Extract { input, output, table, post_type } => {
            let options = extract::Options { table, post_type };
            extract::run(&input, &output, &options)?;
            Ok(())
        }
        Command::Provision { schema, dry_run, connection } => provision(&schema, dry_run, connection),
        Command::Check { schema } => check(&schema),
        Command::Inspect { schema } => {
            let schema = Schema::from_file(&schema)?;
            println!("{schema:#?}");
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info,wp2pg=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn check(path: &Path) -> anyhow::Result<()> {
    let schema = Schema::from_file(path)?;
    let issues = validate_schema(&schema);
    for issue in issues.iter() {
        error!("{}: {issue}", path.display());
    }
    if !issues.is_empty() {
        bail!("{} has {} validation issue(s)", path.display(), issues.len());
    }

    info!(models = schema.models.len(), enums = schema.enums.len(), "{} is valid", path.display());
    Ok(())
}

fn provision(path: &Path, dry_run: bool, connection: ConnectionArgs) -> anyhow::Result<()> {
    let schema = Schema::from_file(path)?;
    info!(models = schema.models.len(), enums = schema.enums.len(), "parsed {}", path.display());
    for issue in validate_schema(&schema) {
        warn!("{}: {issue}", path.display());
    }

    let context = db::Context::new(schema);

    let config_path = connection.config.clone();
    let config = Config::load(config_path.as_deref(), connection.into())
        .context("unable to load connection settings")?;

    if dry_run {
        let mut driver = PlanDriver::default();
        let report = migrate(&mut driver, &context);
        print!("{}", driver.script(&config));
        report.log_summary();
        return Ok(());
    }

    info!(target_database = %config, "provisioning");

    let mut driver = PostgresDriver::connect(&config)
        .context("database setup failed")?;
    let report = migrate(&mut driver, &context);
    report.log_summary();

    Ok(())
}
