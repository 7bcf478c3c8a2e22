pub mod blogs;
pub mod contacts;
pub mod projects;
pub mod skills;

pub use blogs::*;
pub use contacts::*;
pub use projects::*;
pub use skills::*;
