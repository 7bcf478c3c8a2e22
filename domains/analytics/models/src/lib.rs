pub mod view_events;

pub use view_events::{
    CountryCount, DailyViews, EntityViewCount, ReferrerCount, ViewEvent,
    ViewMetadata, ViewTarget,
};
