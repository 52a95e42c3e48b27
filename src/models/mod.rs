pub mod location;
pub mod notice;
pub mod position;
pub mod prayer;
pub mod route;
pub mod seed;

pub use location::{Location, NewLocation};
pub use notice::{Notice, NoticeKind};
pub use position::{Coordinates, UserPosition, DEFAULT_CENTER};
pub use prayer::PrayerType;
pub use route::{RouteInfo, RouteSummary};
pub use seed::seed_locations;
