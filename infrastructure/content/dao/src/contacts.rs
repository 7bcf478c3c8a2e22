use content_errors::ContentError;
use content_models::{ContactMessage, NewContactMessage};
use dao_utils::query_helpers::first_row_or_not_found;
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct ContactDao {
    db: SqlConnect,
}

impl ContactDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(&self, row: &tokio_postgres::Row) -> ContactMessage {
        ContactMessage {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            message: row.get("message"),
            read: row.get("read"),
            created_at: row.get("created_at"),
        }
    }

    #[instrument(skip(self, req))]
    pub async fn insert(
        &self, req: NewContactMessage,
    ) -> Result<ContactMessage, ContentError> {
        let client = self.db.get_client().await?;
        let id = Uuid::now_v7();

        let stmt = client
            .prepare(
                "INSERT INTO contact_messages (id, name, email, message) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, name, email, message, read, created_at",
            )
            .await?;
        let row = client
            .query_one(&stmt, &[&id, &req.name, &req.email, &req.message])
            .await?;

        Ok(self.map_row(&row))
    }

    /// One inbox page, newest first.
    #[instrument(skip(self))]
    pub async fn find_page(
        &self, unread_only: bool, limit: u64, offset: u64,
    ) -> Result<Vec<ContactMessage>, ContentError> {
        let client = self.db.get_read_client().await?;

        let mut query = String::from(
            "SELECT id, name, email, message, read, created_at \
             FROM contact_messages",
        );
        if unread_only {
            query.push_str(" WHERE read = FALSE");
        }
        query.push_str(" ORDER BY created_at DESC LIMIT $1 OFFSET $2");

        let stmt = client.prepare(&query).await?;
        let rows = client
            .query(&stmt, &[&(limit as i64), &(offset as i64)])
            .await?;

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }

    #[instrument(skip(self))]
    pub async fn count(
        &self, unread_only: bool,
    ) -> Result<i64, ContentError> {
        let client = self.db.get_read_client().await?;

        let query = if unread_only {
            "SELECT COUNT(*) FROM contact_messages WHERE read = FALSE"
        }
        else {
            "SELECT COUNT(*) FROM contact_messages"
        };

        let row = client.query_one(query, &[]).await?;
        Ok(row.get(0))
    }

    /// Flags a message as handled. Already-read messages pass through
    /// unchanged, so the call is idempotent.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self, id: Uuid,
    ) -> Result<ContactMessage, ContentError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE contact_messages SET read = TRUE WHERE id = $1 \
                 RETURNING id, name, email, message, read, created_at",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ContentError::ContactNotFound { contact_id: id },
        )
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare("DELETE FROM contact_messages WHERE id = $1")
            .await?;
        let affected = client.execute(&stmt, &[&id]).await?;

        if affected == 0 {
            return Err(ContentError::ContactNotFound { contact_id: id });
        }

        Ok(())
    }
}
