use std::{borrow::Cow, time::Duration};

use database_traits::connection::GetDatabaseConnect;
use deadpool_redis::{Connection, Pool, PoolError};
use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::json::Json;

const DEFAULT_PREFIX: &str = "cache";

/// Handle to the cache backend.
///
/// Every operation degrades gracefully: read failures are logged and treated
/// as a miss, write and delete failures are logged and dropped. Callers never
/// observe a cache error.
#[derive(Clone)]
pub struct CacheConnect {
    pool: Pool,
    prefix: Cow<'static, str>,
}

impl CacheConnect {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            prefix: DEFAULT_PREFIX.into(),
        }
    }

    pub fn with_prefix(
        pool: Pool, prefix: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str { &self.prefix }

    pub async fn get_connection(&self) -> Result<Connection, PoolError> {
        self.pool.get().await
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    /// Read a JSON value; any failure counts as a miss
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let full_key = self.full_key(key);

        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Cache unavailable for key '{}': {}", full_key, e);
                return None;
            }
        };

        match conn.get::<_, Option<Json<T>>>(&full_key).await {
            Ok(value) => value.map(Json::inner),
            Err(e) => {
                warn!("Cache read failed for key '{}': {}", full_key, e);
                None
            }
        }
    }

    /// Store a JSON value with a TTL, best effort
    pub async fn set_with_expire<T>(
        &self, key: &str, value: &T, ttl: Duration,
    ) where
        T: Serialize + Sync,
    {
        let full_key = self.full_key(key);

        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Cache unavailable for key '{}': {}", full_key, e);
                return;
            }
        };

        if let Err(e) = conn
            .set_ex::<_, _, ()>(&full_key, Json(value), ttl.as_secs())
            .await
        {
            warn!("Cache write failed for key '{}': {}", full_key, e);
        }
    }

    /// Remove a single key, best effort
    pub async fn del(&self, key: &str) {
        let full_key = self.full_key(key);

        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Cache unavailable for key '{}': {}", full_key, e);
                return;
            }
        };

        if let Err(e) = conn.del::<_, ()>(&full_key).await {
            warn!("Cache delete failed for key '{}': {}", full_key, e);
        }
    }

    /// Remove every key matching the pattern (under this prefix), best
    /// effort. The pattern may use `*` wildcards.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        let full_pattern = self.full_key(pattern);

        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(
                    "Cache unavailable for pattern '{}': {}",
                    full_pattern, e
                );
                return;
            }
        };

        let mut keys: Vec<String> = Vec::new();
        let mut cursor: u64 = 0;
        loop {
            let reply: (u64, Vec<String>) = match redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&full_pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut conn)
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(
                        "Cache scan failed for pattern '{}': {}",
                        full_pattern, e
                    );
                    return;
                }
            };

            cursor = reply.0;
            keys.extend(reply.1);

            if cursor == 0 {
                break;
            }
        }

        if keys.is_empty() {
            return;
        }

        let matched = keys.len();
        match conn.del::<_, ()>(keys).await {
            Ok(()) => {
                debug!(
                    "Invalidated {} cache keys matching '{}'",
                    matched, full_pattern
                );
            }
            Err(e) => {
                warn!(
                    "Cache invalidation failed for pattern '{}': {}",
                    full_pattern, e
                );
            }
        }
    }
}

impl GetDatabaseConnect for CacheConnect {
    type Connect = Pool;

    fn get_connect(&self) -> &Self::Connect { &self.pool }
}

#[cfg(test)]
mod tests {
    use deadpool_redis::Config;

    use super::*;

    fn dummy_connect(prefix: Option<&'static str>) -> CacheConnect {
        let cfg = Config {
            url: Some("redis://127.0.0.1:6379/0".to_string()),
            pool: None,
            connection: None,
        };
        let pool = cfg.create_pool(None).unwrap();

        match prefix {
            Some(prefix) => CacheConnect::with_prefix(pool, prefix),
            None => CacheConnect::new(pool),
        }
    }

    #[test]
    fn default_prefix_is_applied() {
        let cache = dummy_connect(None);
        assert_eq!(cache.full_key("project:42"), "cache:project:42");
    }

    #[test]
    fn custom_prefix_is_applied() {
        let cache = dummy_connect(Some("test-abc"));
        assert_eq!(cache.full_key("skills:list:all"), "test-abc:skills:list:all");
    }
}
