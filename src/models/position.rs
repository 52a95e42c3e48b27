use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Central Abuja; the map's initial centre and the synthetic default position.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 9.0765,
    lng: 7.4894,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance in kilometres.
    pub fn haversine_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Where the user is, or a stand-in for it.
///
/// `is_default` marks the synthetic fallback position. It only changes how the
/// marker is drawn and described; distances are computed the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserPosition {
    pub lat: f64,
    pub lng: f64,
    pub is_default: bool,
}

impl UserPosition {
    pub fn from_device(coords: Coordinates) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
            is_default: false,
        }
    }

    pub fn default_at(coords: Coordinates) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
            is_default: true,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    pub fn marker_label(&self) -> &'static str {
        if self.is_default {
            "Default Location"
        } else {
            "Your Location"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_matches_known_distance() {
        // Wuse 2 to Kubwa is roughly 18 km as the crow flies
        let wuse = Coordinates::new(9.0784, 7.4753);
        let kubwa = Coordinates::new(9.1667, 7.3333);
        let km = wuse.haversine_km(&kubwa);
        assert!((km - 18.4).abs() < 1.0, "got {km}");
        assert_eq!(wuse.haversine_km(&wuse), 0.0);
    }

    #[test]
    fn default_position_is_flagged() {
        let pos = UserPosition::default_at(DEFAULT_CENTER);
        assert!(pos.is_default);
        assert_eq!(pos.coordinates(), DEFAULT_CENTER);
        assert_eq!(pos.marker_label(), "Default Location");
    }
}
