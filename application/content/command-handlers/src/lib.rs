pub mod blogs;
pub mod contacts;
pub mod projects;
pub mod skills;

pub use blogs::{CreateBlogHandler, DeleteBlogHandler, UpdateBlogHandler};
pub use contacts::{
    ContactNotifier, DeleteContactHandler, LogNotifier,
    MarkContactReadHandler, NotifyError, SubmitContactHandler,
};
pub use projects::{
    CreateProjectHandler, DeleteProjectHandler, UpdateProjectHandler,
};
pub use skills::{CreateSkillHandler, DeleteSkillHandler, UpdateSkillHandler};
