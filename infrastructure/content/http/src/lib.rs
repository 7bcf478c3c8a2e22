pub mod blogs;
pub mod contacts;
pub mod projects;
pub mod skills;
mod tracking;

use std::sync::Arc;

use admin_auth::AdminToken;
use analytics_command_handlers::TrackViewHandler;
use axum::extract::FromRef;
use content_command_handlers::{
    ContactNotifier, CreateBlogHandler, CreateProjectHandler,
    CreateSkillHandler, DeleteBlogHandler, DeleteContactHandler,
    DeleteProjectHandler, DeleteSkillHandler, MarkContactReadHandler,
    SubmitContactHandler, UpdateBlogHandler, UpdateProjectHandler,
    UpdateSkillHandler,
};
use content_query_handlers::{
    GetBlogBySlugQueryHandler, GetProjectQueryHandler, GetSkillQueryHandler,
    ListBlogsQueryHandler, ListContactsQueryHandler, ListProjectsQueryHandler,
    ListSkillsQueryHandler,
};
use redis_connection::CacheConnect;
use sql_connection::SqlConnect;

pub use crate::{
    blogs::BlogHandlers, contacts::ContactHandlers, projects::ProjectHandlers,
    skills::SkillHandlers,
};

/// Handler bundle behind every content route. Built once at startup and
/// cloned into router state; each handler owns its pooled connections.
#[derive(Clone)]
pub struct ContentServices {
    pub create_project: CreateProjectHandler,
    pub update_project: UpdateProjectHandler,
    pub delete_project: DeleteProjectHandler,
    pub get_project: GetProjectQueryHandler,
    pub list_projects: ListProjectsQueryHandler,

    pub create_blog: CreateBlogHandler,
    pub update_blog: UpdateBlogHandler,
    pub delete_blog: DeleteBlogHandler,
    pub get_blog_by_slug: GetBlogBySlugQueryHandler,
    pub list_blogs: ListBlogsQueryHandler,

    pub create_skill: CreateSkillHandler,
    pub update_skill: UpdateSkillHandler,
    pub delete_skill: DeleteSkillHandler,
    pub get_skill: GetSkillQueryHandler,
    pub list_skills: ListSkillsQueryHandler,

    pub submit_contact: SubmitContactHandler,
    pub mark_contact_read: MarkContactReadHandler,
    pub delete_contact: DeleteContactHandler,
    pub list_contacts: ListContactsQueryHandler,

    pub track_view: TrackViewHandler,
    pub admin_token: AdminToken,
}

impl ContentServices {
    pub fn new(
        db: SqlConnect, cache: CacheConnect,
        notifier: Arc<dyn ContactNotifier>, admin_token: AdminToken,
    ) -> Self {
        Self {
            create_project: CreateProjectHandler::new(
                db.clone(),
                cache.clone(),
            ),
            update_project: UpdateProjectHandler::new(
                db.clone(),
                cache.clone(),
            ),
            delete_project: DeleteProjectHandler::new(
                db.clone(),
                cache.clone(),
            ),
            get_project: GetProjectQueryHandler::new(db.clone(), cache.clone()),
            list_projects: ListProjectsQueryHandler::new(
                db.clone(),
                cache.clone(),
            ),
            create_blog: CreateBlogHandler::new(db.clone(), cache.clone()),
            update_blog: UpdateBlogHandler::new(db.clone(), cache.clone()),
            delete_blog: DeleteBlogHandler::new(db.clone(), cache.clone()),
            get_blog_by_slug: GetBlogBySlugQueryHandler::new(
                db.clone(),
                cache.clone(),
            ),
            list_blogs: ListBlogsQueryHandler::new(db.clone(), cache.clone()),
            create_skill: CreateSkillHandler::new(db.clone(), cache.clone()),
            update_skill: UpdateSkillHandler::new(db.clone(), cache.clone()),
            delete_skill: DeleteSkillHandler::new(db.clone(), cache.clone()),
            get_skill: GetSkillQueryHandler::new(db.clone()),
            list_skills: ListSkillsQueryHandler::new(db.clone(), cache),
            submit_contact: SubmitContactHandler::new(db.clone(), notifier),
            mark_contact_read: MarkContactReadHandler::new(db.clone()),
            delete_contact: DeleteContactHandler::new(db.clone()),
            list_contacts: ListContactsQueryHandler::new(db.clone()),
            track_view: TrackViewHandler::new(db),
            admin_token,
        }
    }
}

impl FromRef<ContentServices> for AdminToken {
    fn from_ref(services: &ContentServices) -> Self {
        services.admin_token.clone()
    }
}
