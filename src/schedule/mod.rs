pub mod filter;
pub mod grouping;
pub mod time;

pub use filter::{filter_locations, LocationQuery};
pub use grouping::{group_by_time, TimeBucket};
pub use time::{normalize_time, to_minutes};
