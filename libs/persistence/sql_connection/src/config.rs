pub trait DbConnectConfig: serde::de::DeserializeOwned {
    fn scheme(&self) -> &str;
    fn username(&self) -> &str;
    fn password(&self) -> &str;
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn name(&self) -> &str;

    fn uri(&self) -> &str { "" }
}

/// Configure database connection pool data
pub trait DbOptionsConfig {
    fn max_conn(&self) -> Option<u32> { None }
    fn min_conn(&self) -> Option<u32> { None }
    fn sql_logger(&self) -> bool { false }
}

/// Optional read-replica endpoint for read-write splitting
pub trait ReadReplicaConfig {
    fn read_replica_uri(&self) -> Option<&str> { None }
    fn read_max_conn(&self) -> Option<u32> { None }
    fn read_min_conn(&self) -> Option<u32> { None }
}

#[derive(Debug, serde::Deserialize)]
pub struct PostgresDbConfig {
    pub uri: String,
    pub max_conn: Option<u32>,
    pub min_conn: Option<u32>,
    #[serde(default)]
    pub read_uri: Option<String>,
    #[serde(default)]
    pub read_max_conn: Option<u32>,
    #[serde(default)]
    pub read_min_conn: Option<u32>,
    #[serde(default = "logger_default")]
    pub logger: bool,
}

impl DbConnectConfig for PostgresDbConfig {
    fn scheme(&self) -> &str { "postgresql" }

    fn username(&self) -> &str { "" }

    fn password(&self) -> &str { "" }

    fn host(&self) -> &str { "" }

    fn port(&self) -> u16 { 5432 }

    fn name(&self) -> &str { "" }

    fn uri(&self) -> &str { &self.uri }
}

impl DbOptionsConfig for PostgresDbConfig {
    fn max_conn(&self) -> Option<u32> { self.max_conn }

    fn min_conn(&self) -> Option<u32> { self.min_conn }

    fn sql_logger(&self) -> bool { self.logger }
}

impl ReadReplicaConfig for PostgresDbConfig {
    fn read_replica_uri(&self) -> Option<&str> { self.read_uri.as_deref() }

    fn read_max_conn(&self) -> Option<u32> { self.read_max_conn }

    fn read_min_conn(&self) -> Option<u32> { self.read_min_conn }
}

fn logger_default() -> bool { false }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let config: PostgresDbConfig = serde_json::from_str(
            r#"{"uri": "postgres://localhost/app", "max_conn": 16, "min_conn": null}"#,
        )
        .unwrap();

        assert_eq!(config.uri(), "postgres://localhost/app");
        assert_eq!(config.max_conn(), Some(16));
        assert_eq!(config.min_conn(), None);
        assert!(!config.sql_logger());
        assert!(config.read_replica_uri().is_none());
    }

    #[test]
    fn deserializes_read_replica_fields() {
        let config: PostgresDbConfig = serde_json::from_str(
            r#"{
                "uri": "postgres://primary/app",
                "max_conn": 32,
                "min_conn": 4,
                "read_uri": "postgres://replica/app",
                "read_max_conn": 64
            }"#,
        )
        .unwrap();

        assert_eq!(config.read_replica_uri(), Some("postgres://replica/app"));
        assert_eq!(config.read_max_conn(), Some(64));
        assert_eq!(config.read_min_conn(), None);
    }
}
