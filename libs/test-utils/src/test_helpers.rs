use anyhow::Result;
use chrono::{DateTime, Utc};
use redis_connection::CacheConnect;
use sql_connection::SqlConnect;
use uuid::Uuid;

use crate::{TestPostgresContainer, TestRedisContainer};

/// Create a SQL connection from a test container for use with DAOs and
/// handlers
pub fn create_sql_connect(container: &TestPostgresContainer) -> SqlConnect {
    SqlConnect::new(container.pool.clone())
}

/// Create a cache connection scoped to the container's test prefix
pub fn create_cache_connect(container: &TestRedisContainer) -> CacheConnect {
    CacheConnect::with_prefix(
        container.pool.clone(),
        container.test_prefix.clone(),
    )
}

/// Insert a project row and return its id
pub async fn create_test_project(
    container: &TestPostgresContainer, title: &str, featured: bool,
) -> Result<Uuid> {
    let id = Uuid::now_v7();
    let client = container.client().await?;
    client
        .execute(
            "INSERT INTO projects (id, title, description, featured) VALUES \
             ($1, $2, 'Test project', $3)",
            &[&id, &title, &featured],
        )
        .await?;
    Ok(id)
}

/// Insert a blog row and return its id
pub async fn create_test_blog(
    container: &TestPostgresContainer, title: &str, slug: &str,
    published: bool,
) -> Result<Uuid> {
    let id = Uuid::now_v7();
    let published_at = published.then(Utc::now);
    let client = container.client().await?;
    client
        .execute(
            "INSERT INTO blogs (id, title, slug, content, published, \
             published_at) VALUES ($1, $2, $3, 'Test content', $4, $5)",
            &[&id, &title, &slug, &published, &published_at],
        )
        .await?;
    Ok(id)
}

/// Insert a skill row and return its id
pub async fn create_test_skill(
    container: &TestPostgresContainer, category: &str, name: &str,
) -> Result<Uuid> {
    let id = Uuid::now_v7();
    let client = container.client().await?;
    client
        .execute(
            "INSERT INTO skills (id, category, name) VALUES ($1, $2, $3)",
            &[&id, &category, &name],
        )
        .await?;
    Ok(id)
}

/// Insert a view event against exactly one of the two targets
pub async fn create_test_view_event(
    container: &TestPostgresContainer, project_id: Option<Uuid>,
    blog_id: Option<Uuid>, country: Option<&str>, referrer: Option<&str>,
    timestamp: DateTime<Utc>,
) -> Result<Uuid> {
    let id = Uuid::now_v7();
    let client = container.client().await?;
    client
        .execute(
            "INSERT INTO view_events (id, project_id, blog_id, country, \
             referrer, timestamp) VALUES ($1, $2, $3, $4, $5, $6)",
            &[&id, &project_id, &blog_id, &country, &referrer, &timestamp],
        )
        .await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::TestPostgresContainer;

    #[tokio::test]
    async fn test_create_test_project() {
        let container = TestPostgresContainer::new().await.unwrap();
        let project_id =
            create_test_project(&container, "Probe", true).await.unwrap();

        let client = container.client().await.unwrap();
        let row = client
            .query_one(
                "SELECT featured FROM projects WHERE id = $1",
                &[&project_id],
            )
            .await
            .unwrap();
        assert!(row.get::<_, bool>(0));
    }

    #[tokio::test]
    async fn test_create_test_view_event_targets() {
        let container = TestPostgresContainer::new().await.unwrap();
        let project_id =
            create_test_project(&container, "Probe", false).await.unwrap();

        create_test_view_event(
            &container,
            Some(project_id),
            None,
            Some("DE"),
            Some("https://example.com"),
            Utc::now(),
        )
        .await
        .unwrap();

        // The single-target constraint rejects an event pointing nowhere
        let result =
            create_test_view_event(&container, None, None, None, None, Utc::now())
                .await;
        assert!(result.is_err());
    }
}
