pub mod detached;
pub mod pagination;
pub mod query_helpers;

pub use detached::spawn_detached;
pub use pagination::PageParams;
pub use query_helpers::first_row_or_not_found;
