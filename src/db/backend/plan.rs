use crate::config::Config;
use crate::db::backend::Driver;
use crate::db::ddl;

/// Records statements instead of executing them, for `--dry-run`.
#[derive(Debug, Default)]
pub struct PlanDriver {
    pub items: Vec<Vec<String>>,
}

impl PlanDriver {
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.items.iter()
            .flatten()
            .map(String::as_str)
    }

    /// The setup `PostgresDriver::connect` would run for `config`, then every
    /// recorded statement, one per line.
    pub fn script(&self, config: &Config) -> String {
        let mut lines = vec![
            format!(
                "-- on {}, only when database {} does not exist",
                ddl::quote_ident(ddl::MAINTENANCE_DATABASE),
                ddl::quote_ident(&config.database),
            ),
            format!("{};", ddl::create_database(&config.database, &config.user)),
            format!("-- on {}", ddl::quote_ident(&config.database)),
            format!("{};", ddl::UUID_EXTENSION),
        ];
        lines.extend(self.statements().map(|statement| format!("{statement};")));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Driver for PlanDriver {
    fn apply(&mut self, statements: &[String]) -> anyhow::Result<()> {
        self.items.push(statements.to_vec());
        Ok(())
    }
}
