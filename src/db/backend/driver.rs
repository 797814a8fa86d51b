use thiserror::Error;

pub trait Driver {
    /// Runs the statements of one provisioning item as a single transaction.
    /// Nothing is kept when any statement fails.
    fn apply(&mut self, statements: &[String]) -> anyhow::Result<()>;
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("unable to connect to {host}:{port}/{database}: {source}")]
    Connect {
        host: String,
        port: u16,
        database: String,
        source: postgres::Error,
    },
    #[error("statement failed: {statement}: {source}")]
    Statement {
        statement: String,
        source: postgres::Error,
    },
    #[error("transaction failed: {0}")]
    Transaction(#[from] postgres::Error),
}
