pub mod blogs;
pub mod contacts;
pub mod projects;
pub mod skills;

pub use blogs::{Blog, BlogListItem, NewBlog, UpdateBlog};
pub use contacts::{ContactMessage, NewContactMessage};
pub use projects::{NewProject, Project, UpdateProject};
pub use skills::{NewSkill, Skill, UpdateSkill};
