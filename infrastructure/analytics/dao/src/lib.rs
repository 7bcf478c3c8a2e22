pub mod view_events;

pub use view_events::ViewEventDao;
