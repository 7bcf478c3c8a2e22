use async_trait::async_trait;
use content_errors::ContentError;
use content_models::{NewSkill, Skill, UpdateSkill};
use content_responses::SkillResponse;
use dao_utils::query_helpers::first_row_or_not_found;
use database_traits::dao::GenericDao;
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct SkillDao {
    db: SqlConnect,
}

impl SkillDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn map_row(&self, row: &tokio_postgres::Row) -> Skill {
        Skill {
            id: row.get("id"),
            category: row.get("category"),
            name: row.get("name"),
            icon_url: row.get("icon_url"),
            level: row.get("level"),
            sort_order: row.get("sort_order"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    /// The whole catalogue, or one category of it. Ordering keeps categories
    /// together so the grouped projection comes out stable.
    #[instrument(skip(self))]
    pub async fn list_all(
        &self, category: Option<&str>,
    ) -> Result<Vec<Skill>, ContentError> {
        let client = self.db.get_read_client().await?;

        let rows = if let Some(category) = category {
            let stmt = client
                .prepare(
                    "SELECT id, category, name, icon_url, level, sort_order, \
                     created_at, updated_at \
                     FROM skills WHERE category = $1 \
                     ORDER BY category ASC, sort_order ASC, name ASC",
                )
                .await?;
            client.query(&stmt, &[&category]).await?
        }
        else {
            let stmt = client
                .prepare(
                    "SELECT id, category, name, icon_url, level, sort_order, \
                     created_at, updated_at \
                     FROM skills \
                     ORDER BY category ASC, sort_order ASC, name ASC",
                )
                .await?;
            client.query(&stmt, &[]).await?
        };

        Ok(rows.iter().map(|row| self.map_row(row)).collect())
    }

    #[instrument(skip(self))]
    pub async fn find_existing(
        &self, id: Uuid,
    ) -> Result<Skill, ContentError> {
        let client = self.db.get_read_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, category, name, icon_url, level, sort_order, \
                 created_at, updated_at \
                 FROM skills WHERE id = $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row),
            ContentError::SkillNotFound { skill_id: id },
        )
    }
}

#[async_trait]
impl GenericDao for SkillDao {
    type CreateRequest = NewSkill;
    type Error = ContentError;
    type ID = Uuid;
    type Model = Skill;
    type Response = SkillResponse;
    type UpdateRequest = UpdateSkill;

    async fn find_by_id(
        &self, id: Self::ID,
    ) -> Result<Self::Response, Self::Error> {
        Ok(self.find_existing(id).await?.into())
    }

    async fn all(&self) -> Result<Vec<Self::Response>, Self::Error> {
        Ok(self
            .list_all(None)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let id = Uuid::now_v7();

        let stmt = client
            .prepare(
                "INSERT INTO skills (id, category, name, icon_url, level, \
                 sort_order) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING id, category, name, icon_url, level, sort_order, \
                 created_at, updated_at",
            )
            .await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &id,
                    &req.category,
                    &req.name,
                    &req.icon_url,
                    &req.level,
                    &req.sort_order,
                ],
            )
            .await?;

        Ok(self.map_row(&row).into())
    }

    async fn update(
        &self, id: Self::ID, req: Self::UpdateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "UPDATE skills SET category = $2, name = $3, icon_url = $4, \
                 level = $5, sort_order = $6, updated_at = NOW() \
                 WHERE id = $1 \
                 RETURNING id, category, name, icon_url, level, sort_order, \
                 created_at, updated_at",
            )
            .await?;
        let rows = client
            .query(
                &stmt,
                &[
                    &id,
                    &req.category,
                    &req.name,
                    &req.icon_url,
                    &req.level,
                    &req.sort_order,
                ],
            )
            .await?;

        first_row_or_not_found(
            &rows,
            |row| self.map_row(row).into(),
            ContentError::SkillNotFound { skill_id: id },
        )
    }

    /// Removal is physical; the skills table has no tombstone column.
    async fn delete(&self, id: Self::ID) -> Result<(), Self::Error> {
        let client = self.db.get_client().await?;
        let stmt = client.prepare("DELETE FROM skills WHERE id = $1").await?;
        let affected = client.execute(&stmt, &[&id]).await?;

        if affected == 0 {
            return Err(ContentError::SkillNotFound { skill_id: id });
        }

        Ok(())
    }
}
