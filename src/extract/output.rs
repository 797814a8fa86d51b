use std::io;
use std::path::Path;
use crate::extract::{Enrollment, ExtractError};

pub const HEADER: [&str; 5] = ["post_id", "user_id", "course_id", "enrolled_at", "status"];

/// Writes the header and one line per record, header included when empty.
pub fn write_csv(path: &Path, records: &[Enrollment]) -> Result<(), ExtractError> {
    let write_error = |error| ExtractError::Write {
        path: path.to_path_buf(),
        error,
    };

    let file = std::fs::File::create(path)
        .map_err(|error| write_error(csv::Error::from(error)))?;
    write_records(file, records).map_err(write_error)
}

pub fn write_records<W: io::Write>(writer: W, records: &[Enrollment]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
