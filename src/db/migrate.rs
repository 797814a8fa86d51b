use tracing::{debug, error, info, warn};
use crate::db::backend::Driver;
use crate::db::report::{Outcome, Phase, RunReport};
use crate::db::{ddl, Context};

/// Runs the three provisioning phases in order: enums, tables, then
/// unique constraints and indexes. A failed item never stops a phase.
pub fn migrate<D: Driver + ?Sized>(driver: &mut D, context: &Context) -> RunReport {
    let mut report = RunReport::start();

    info!("creating enums");
    migrate_enums(driver, context, &mut report);

    info!("creating tables");
    migrate_tables(driver, context, &mut report);

    info!("adding indexes and constraints");
    migrate_constraints(driver, context, &mut report);

    report.finish();
    report
}

pub fn migrate_enums<D: Driver + ?Sized>(driver: &mut D, context: &Context, report: &mut RunReport) {
    for item in context.schema.enums.iter() {
        let statements = [ddl::drop_enum(item), ddl::create_enum(item)];
        apply_item(driver, report, Phase::Enums, item.name.as_str(), &statements);
    }
}

pub fn migrate_tables<D: Driver + ?Sized>(driver: &mut D, context: &Context, report: &mut RunReport) {
    for table in context.tables.iter() {
        let Some(create) = ddl::create_table(table) else {
            warn!(table = %table.name, model = %table.model, "skipping table without columns");
            report.record(Phase::Tables, table.name.as_str(), Outcome::Skipped("no columns".to_owned()));
            continue;
        };

        let statements = [ddl::drop_table(table), create];
        apply_item(driver, report, Phase::Tables, table.name.as_str(), &statements);
    }
}

pub fn migrate_constraints<D: Driver + ?Sized>(driver: &mut D, context: &Context, report: &mut RunReport) {
    for table in context.tables.iter() {
        for column in table.columns.iter() {
            if column.unique {
                let subject = ddl::unique_constraint_name(table, column);
                apply_item(driver, report, Phase::Constraints, subject, &[ddl::add_unique(table, column)]);
            }

            if column.is_indexed() {
                let subject = ddl::index_name(table, column);
                apply_item(driver, report, Phase::Constraints, subject, &[ddl::create_index(table, column)]);
            }
        }
    }
}

fn apply_item<D: Driver + ?Sized>(
    driver: &mut D,
    report: &mut RunReport,
    phase: Phase,
    subject: impl Into<String>,
    statements: &[String],
) {
    let subject = subject.into();
    for statement in statements {
        debug!(%phase, "{statement}");
    }

    match driver.apply(statements) {
        Ok(()) => {
            info!(%phase, "applied {subject}");
            report.record(phase, subject, Outcome::Applied);
        }
        Err(e) => {
            error!(%phase, "unable to apply {subject}: {e:#}");
            report.record(phase, subject, Outcome::Failed(format!("{e:#}")));
        }
    }
}
