pub mod blogs;
pub mod contacts;
pub mod projects;
pub mod skills;

pub use blogs::BlogDao;
pub use contacts::ContactDao;
pub use projects::ProjectDao;
pub use skills::SkillDao;
