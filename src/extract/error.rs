use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unable to read {}: {error}", path.display())]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("unable to write {}: {error}", path.display())]
    Write {
        path: PathBuf,
        error: csv::Error,
    },
}
