pub use config::{
    DbConnectConfig, DbOptionsConfig, PostgresDbConfig, ReadReplicaConfig,
};
pub use database_traits;
pub use deadpool_postgres::PoolError;
pub use impl_get_connect::SqlConnect;
pub use tokio_postgres::Error as PgError;

pub mod config;
mod connection;
mod impl_get_connect;

pub use connection::{connect_postgres_db, connect_postgres_read_replica};
