use deadpool_postgres::Pool;

/// SQL-based migration system using .sql files
/// This is a simple, reliable migration system that uses plain SQL files
pub struct SqlMigrator {
    pool: Pool,
}

impl SqlMigrator {
    pub fn new(pool: Pool) -> Self { Self { pool } }

    /// Run all migrations in order from domain-specific SQL files
    pub async fn run_all_migrations(&self) -> anyhow::Result<()> {
        // Create the migration tracking table
        self.create_migration_table().await?;

        // Define migrations in order using domain-specific SQL files
        let migrations = vec![
            ("001_create_projects", include_str!("../../../domains/content/migrations/sql/001_create_projects.sql")),
            ("002_create_blogs", include_str!("../../../domains/content/migrations/sql/002_create_blogs.sql")),
            ("003_create_skills", include_str!("../../../domains/content/migrations/sql/003_create_skills.sql")),
            ("004_create_contact_messages", include_str!("../../../domains/content/migrations/sql/004_create_contact_messages.sql")),
            ("005_create_view_events", include_str!("../../../domains/analytics/migrations/sql/005_create_view_events.sql")),
        ];

        for (migration_name, migration_sql) in migrations {
            if !self.is_migration_applied(migration_name).await? {
                println!("Running migration: {}", migration_name);

                // Run the migration in a transaction
                let mut client = self.pool.get().await?;
                let tx = client.transaction().await?;

                tx.batch_execute(migration_sql).await.map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to run migration {}: {}",
                        migration_name,
                        e
                    )
                })?;

                // Record that this migration was applied
                tx.execute(
                    "INSERT INTO _migrations (name, applied_at) VALUES ($1, \
                     NOW())",
                    &[&migration_name],
                )
                .await?;

                tx.commit().await?;
                println!(
                    "Migration {} completed successfully",
                    migration_name
                );
            } else {
                println!(
                    "Migration {} already applied, skipping",
                    migration_name
                );
            }
        }

        Ok(())
    }

    /// Create the migration tracking table
    async fn create_migration_table(&self) -> anyhow::Result<()> {
        let client = self.pool.get().await?;
        client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS _migrations (
                    id SERIAL PRIMARY KEY,
                    name VARCHAR(255) NOT NULL UNIQUE,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                &[],
            )
            .await?;
        Ok(())
    }

    /// Check if a migration has already been applied
    async fn is_migration_applied(
        &self, migration_name: &str,
    ) -> anyhow::Result<bool> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "SELECT COUNT(*) FROM _migrations WHERE name = $1",
                &[&migration_name],
            )
            .await?;
        let count: i64 = row.get(0);

        Ok(count > 0)
    }

    /// Run a specific migration by name (for testing)
    pub async fn run_migration(
        &self, migration_name: &str, migration_sql: &str,
    ) -> anyhow::Result<()> {
        self.create_migration_table().await?;

        if !self.is_migration_applied(migration_name).await? {
            let mut client = self.pool.get().await?;
            let tx = client.transaction().await?;

            tx.batch_execute(migration_sql).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to run migration {}: {}",
                    migration_name,
                    e
                )
            })?;

            tx.execute(
                "INSERT INTO _migrations (name, applied_at) VALUES ($1, \
                 NOW())",
                &[&migration_name],
            )
            .await?;

            tx.commit().await?;
        }

        Ok(())
    }

    /// List applied migrations
    pub async fn list_applied_migrations(
        &self,
    ) -> anyhow::Result<Vec<String>> {
        self.create_migration_table().await?;

        let client = self.pool.get().await?;
        let rows = client
            .query("SELECT name FROM _migrations ORDER BY applied_at", &[])
            .await?;

        Ok(rows.into_iter().map(|row| row.get(0)).collect())
    }

    /// Run down migrations using .down.sql files
    pub async fn run_down_migrations(
        &self, migrations_to_rollback: &[&str],
    ) -> anyhow::Result<()> {
        let down_migrations = vec![
            ("005_create_view_events", include_str!("../../../domains/analytics/migrations/sql/005_create_view_events.down.sql")),
            ("004_create_contact_messages", include_str!("../../../domains/content/migrations/sql/004_create_contact_messages.down.sql")),
            ("003_create_skills", include_str!("../../../domains/content/migrations/sql/003_create_skills.down.sql")),
            ("002_create_blogs", include_str!("../../../domains/content/migrations/sql/002_create_blogs.down.sql")),
            ("001_create_projects", include_str!("../../../domains/content/migrations/sql/001_create_projects.down.sql")),
        ];

        for (migration_name, down_sql) in down_migrations {
            if migrations_to_rollback.contains(&migration_name) {
                println!("Rolling back migration: {}", migration_name);

                let mut client = self.pool.get().await?;
                let tx = client.transaction().await?;

                tx.batch_execute(down_sql).await.map_err(|e| {
                    anyhow::anyhow!(
                        "Failed to rollback migration {}: {}",
                        migration_name,
                        e
                    )
                })?;

                // Remove from migration tracking
                tx.execute(
                    "DELETE FROM _migrations WHERE name = $1",
                    &[&migration_name],
                )
                .await?;

                tx.commit().await?;
                println!(
                    "Migration {} rolled back successfully",
                    migration_name
                );
            }
        }

        Ok(())
    }

    /// Reset all migrations by running down migrations in reverse order
    pub async fn reset_all(&self) -> anyhow::Result<()> {
        println!(
            "WARNING: Resetting all migrations - this will delete ALL data!"
        );

        let applied_migrations = self.list_applied_migrations().await?;
        let migrations_to_rollback: Vec<&str> =
            applied_migrations.iter().map(|s| s.as_str()).collect();

        self.run_down_migrations(&migrations_to_rollback).await?;

        // Finally drop the migrations table itself
        let client = self.pool.get().await?;
        client
            .execute("DROP TABLE IF EXISTS _migrations CASCADE", &[])
            .await?;

        println!("All migrations reset successfully");
        Ok(())
    }
}
