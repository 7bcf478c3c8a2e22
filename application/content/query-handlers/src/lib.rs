pub mod blogs;
pub mod contacts;
pub mod projects;
pub mod skills;

pub use blogs::{GetBlogBySlugQueryHandler, ListBlogsQueryHandler};
pub use contacts::ListContactsQueryHandler;
pub use projects::{GetProjectQueryHandler, ListProjectsQueryHandler};
pub use skills::{GetSkillQueryHandler, ListSkillsQueryHandler};
