use content_cache_keys::SKILLS_PATTERN;
use content_commands::{
    CreateSkillCommand, DeleteSkillCommand, UpdateSkillCommand,
};
use content_dao::SkillDao;
use content_errors::ContentError;
use content_models::{NewSkill, UpdateSkill};
use content_responses::SkillResponse;
use database_traits::dao::GenericDao;
use redis_connection::CacheConnect;
use sql_connection::SqlConnect;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct CreateSkillHandler {
    skill_dao: SkillDao,
    cache: CacheConnect,
}

impl CreateSkillHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            skill_dao: SkillDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: CreateSkillCommand,
    ) -> Result<SkillResponse, ContentError> {
        let created = self
            .skill_dao
            .create(NewSkill {
                category: command.category,
                name: command.name,
                icon_url: command.icon_url,
                level: command.level,
                sort_order: command.sort_order,
            })
            .await?;

        self.cache.invalidate_pattern(SKILLS_PATTERN).await;

        Ok(created)
    }
}

#[derive(Clone)]
pub struct UpdateSkillHandler {
    skill_dao: SkillDao,
    cache: CacheConnect,
}

impl UpdateSkillHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            skill_dao: SkillDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, skill_id: Uuid, command: UpdateSkillCommand,
    ) -> Result<SkillResponse, ContentError> {
        let existing = self.skill_dao.find_existing(skill_id).await?;

        let updated = self
            .skill_dao
            .update(skill_id, UpdateSkill {
                category: command.category.unwrap_or(existing.category),
                name: command.name.unwrap_or(existing.name),
                icon_url: command.icon_url.or(existing.icon_url),
                level: command.level.unwrap_or(existing.level),
                sort_order: command.sort_order.unwrap_or(existing.sort_order),
            })
            .await?;

        self.cache.invalidate_pattern(SKILLS_PATTERN).await;

        Ok(updated)
    }
}

#[derive(Clone)]
pub struct DeleteSkillHandler {
    skill_dao: SkillDao,
    cache: CacheConnect,
}

impl DeleteSkillHandler {
    pub fn new(db: SqlConnect, cache: CacheConnect) -> Self {
        Self {
            skill_dao: SkillDao::new(db),
            cache,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, command: DeleteSkillCommand,
    ) -> Result<(), ContentError> {
        self.skill_dao.delete(command.skill_id).await?;

        self.cache.invalidate_pattern(SKILLS_PATTERN).await;

        Ok(())
    }
}
