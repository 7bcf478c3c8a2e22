pub mod postgres;
pub mod redis;
pub mod sql_migrator;
pub mod test_helpers;

pub use postgres::TestPostgresContainer;
pub use redis::TestRedisContainer;
pub use test_helpers::*;

pub use crate::sql_migrator::SqlMigrator;
