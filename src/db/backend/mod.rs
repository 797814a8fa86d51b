mod driver;
mod plan;
mod postgres;

pub use driver::{Driver, DriverError};
pub use plan::PlanDriver;
pub use self::postgres::PostgresDriver;
