use std::time::Duration;

use anyhow::{Context, Result};
use deadpool_redis::{Config, Pool, Runtime};

/// Shared test Redis reachable on a fixed endpoint.
///
/// Isolation comes from a unique key prefix rather than a dedicated
/// instance; `flush_db` only touches keys under this test's prefix.
pub struct TestRedisContainer {
    pub pool: Pool,
    pub connection_string: String,
    pub test_prefix: String,
}

impl TestRedisContainer {
    /// Connect to the test Redis and set up prefix isolation
    pub async fn new() -> Result<Self> {
        let connection_string = std::env::var("TEST_REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6380".to_string());

        // Unique prefix keeps concurrent tests out of each other's keyspace
        let test_prefix = format!("test_{}", uuid::Uuid::now_v7().simple());

        let pool = Self::create_pool(&connection_string).await?;

        Ok(Self {
            pool,
            connection_string,
            test_prefix,
        })
    }

    async fn create_pool(connection_string: &str) -> Result<Pool> {
        let mut cfg = Config::from_url(connection_string);
        cfg.pool = Some(deadpool_redis::PoolConfig::new(10));
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?;

        // Test the connection
        let mut attempts = 0;
        loop {
            match pool.get().await {
                Ok(mut conn) => {
                    match deadpool_redis::redis::cmd("PING")
                        .query_async::<()>(&mut conn)
                        .await
                    {
                        Ok(_) => break,
                        Err(_) if attempts < 20 => {
                            attempts += 1;
                            tokio::time::sleep(Duration::from_millis(500))
                                .await;
                            continue;
                        }
                        Err(e) => return Err(e).context("Redis not ready"),
                    }
                }
                Err(_) if attempts < 20 => {
                    attempts += 1;
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    continue;
                }
                Err(e) => {
                    return Err(e).context("Failed to get Redis connection");
                }
            }
        }

        Ok(pool)
    }

    pub async fn get_connection(&self) -> Result<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    pub async fn flush_db(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;

        // Get all keys under this test's prefix and delete them
        let pattern = format!("{}:*", self.test_prefix);
        let keys: Vec<String> = deadpool_redis::redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await?;

        if !keys.is_empty() {
            deadpool_redis::redis::cmd("DEL")
                .arg(&keys)
                .query_async::<()>(&mut conn)
                .await?;
        }

        Ok(())
    }

    /// Get a test-prefixed key, matching the cache layer's layout
    pub fn test_key(&self, key: &str) -> String {
        format!("{}:{}", self.test_prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn redis_round_trip_under_test_prefix() {
        let container = TestRedisContainer::new().await.unwrap();

        let mut conn = container.get_connection().await.unwrap();

        let _: () = deadpool_redis::redis::cmd("SET")
            .arg(container.test_key("probe"))
            .arg("probe_value")
            .query_async(&mut conn)
            .await
            .unwrap();

        let value: String = deadpool_redis::redis::cmd("GET")
            .arg(container.test_key("probe"))
            .query_async(&mut conn)
            .await
            .unwrap();

        assert_eq!(value, "probe_value");

        container.flush_db().await.unwrap();

        let gone: Option<String> = deadpool_redis::redis::cmd("GET")
            .arg(container.test_key("probe"))
            .query_async(&mut conn)
            .await
            .unwrap();
        assert!(gone.is_none());
    }
}
