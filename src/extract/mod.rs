mod error;
mod output;
mod scanner;

use std::path::Path;
use serde_derive::Serialize;
use tracing::{debug, info};

pub use error::ExtractError;
pub use output::{write_csv, write_records};
pub use scanner::{scan_inserts, SqlValue};

pub const DEFAULT_TABLE: &str = "wp_posts";
pub const ENROLLED_POST_TYPE: &str = "tutor_enrolled";

// wp_posts column positions
const ID: usize = 0;
const POST_AUTHOR: usize = 1;
const POST_DATE: usize = 2;
const POST_STATUS: usize = 7;
const POST_PARENT: usize = 17;
const POST_TYPE: usize = 20;
const MIN_COLUMNS: usize = POST_TYPE + 1;

/// One user's enrollment in one course. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enrollment {
    pub post_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub enrolled_at: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub table: String,
    pub post_type: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_owned(),
            post_type: ENROLLED_POST_TYPE.to_owned(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub statements: usize,
    pub rows: usize,
    pub short_rows: usize,
    pub other_post_type: usize,
    pub invalid_ids: usize,
    pub extracted: usize,
}

/// Enrollment records of every matching row, in the order they appear.
pub fn extract_enrollments(sql: &str, options: &Options) -> (Vec<Enrollment>, Stats) {
    let mut stats = Stats::default();
    let mut out = Vec::new();

    for statement in scan_inserts(sql, &options.table) {
        stats.statements += 1;
        for row in statement.rows.iter() {
            stats.rows += 1;
            if let Some(enrollment) = enrollment_from_row(row, options, &mut stats) {
                out.push(enrollment);
            }
        }
    }

    stats.extracted = out.len();
    (out, stats)
}

fn enrollment_from_row(row: &[SqlValue], options: &Options, stats: &mut Stats) -> Option<Enrollment> {
    if row.len() < MIN_COLUMNS {
        stats.short_rows += 1;
        return None;
    }

    if row[POST_TYPE].as_text().trim() != options.post_type {
        stats.other_post_type += 1;
        return None;
    }

    let id = |index: usize| row[index].as_text().trim().parse::<i64>().ok();
    let (Some(post_id), Some(user_id), Some(course_id)) = (id(ID), id(POST_AUTHOR), id(POST_PARENT)) else {
        stats.invalid_ids += 1;
        return None;
    };

    Some(Enrollment {
        post_id,
        user_id,
        course_id,
        enrolled_at: row[POST_DATE].as_text().trim().to_owned(),
        status: row[POST_STATUS].as_text().trim().to_owned(),
    })
}

/// Reads a dump, writes the enrollment CSV and returns what was seen.
pub fn run(input: &Path, output: &Path, options: &Options) -> Result<Stats, ExtractError> {
    let sql = std::fs::read_to_string(input)
        .map_err(|error| ExtractError::Read {
            path: input.to_path_buf(),
            error,
        })?;

    let (enrollments, stats) = extract_enrollments(&sql, options);
    debug!(?stats, "extraction finished");

    write_csv(output, &enrollments)?;
    info!(output = %output.display(), "extracted {} enrollments", enrollments.len());
    Ok(stats)
}
