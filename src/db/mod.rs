pub mod validate;
pub mod migrate;

pub mod backend;
pub mod context;
pub mod ddl;
pub mod model;
pub mod report;
pub mod types;

pub use context::Context;
