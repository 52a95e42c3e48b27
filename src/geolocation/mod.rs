pub mod coordinator;
pub mod provider;

pub use coordinator::{GeoOutcome, GeoState, GeolocationCoordinator};
pub use provider::{provider_from_config, GeolocationProvider};

use crate::models::Notice;

/// Why a position could not be acquired. Every reason gets its own message,
/// and every reason offers the same recovery: use the default location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// No geolocation capability at all.
    Unsupported,
    Other,
}

impl FailureReason {
    /// Maps platform error codes: 1 permission, 2 unavailable, 3 timeout.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => FailureReason::PermissionDenied,
            2 => FailureReason::PositionUnavailable,
            3 => FailureReason::Timeout,
            _ => FailureReason::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::PermissionDenied => "permission denied",
            FailureReason::PositionUnavailable => "position unavailable",
            FailureReason::Timeout => "timeout",
            FailureReason::Unsupported => "unsupported",
            FailureReason::Other => "other",
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            FailureReason::PermissionDenied => Notice::error(
                "Location access denied",
                "You can manually set your location instead.",
            ),
            FailureReason::PositionUnavailable => Notice::error(
                "Position unavailable",
                "Your current position is unavailable. You can manually set your location instead.",
            ),
            FailureReason::Timeout => Notice::error(
                "Location timeout",
                "Getting your location timed out. You can manually set your location instead.",
            ),
            FailureReason::Unsupported => Notice::error(
                "Geolocation not supported",
                "No location provider is available. You can manually set your location instead.",
            ),
            FailureReason::Other => Notice::error(
                "Location error",
                "Unable to get your location. You can manually set your location instead.",
            ),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
