pub mod settings;

pub use settings::{ApiConfig, AppConfig, GeolocationConfig, RoutingConfig};
