use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{Coordinates, RouteSummary};

/// Computes a travel route between two points. Injected into the route
/// coordinator; implementations may block.
pub trait RoutingEngine: Send + Sync {
    fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, RoutingError>;
}

/// Client for an OSRM `route/v1` service.
pub struct OsrmEngine {
    base_url: String,
    profile: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

impl OsrmEngine {
    pub fn new(base_url: &str, profile: &str, timeout: Duration) -> Result<Self, RoutingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            profile: profile.to_string(),
            client,
        })
    }

    fn route_url(&self, origin: Coordinates, destination: Coordinates) -> String {
        // OSRM takes lng,lat pairs
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=false&alternatives=false",
            self.base_url, self.profile, origin.lng, origin.lat, destination.lng, destination.lat
        )
    }
}

impl RoutingEngine for OsrmEngine {
    fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, RoutingError> {
        let resp = self.client.get(self.route_url(origin, destination)).send()?;
        let status = resp.status();
        let body: OsrmResponse = resp
            .json()
            .map_err(|e| RoutingError::Decode(format!("HTTP {}: {}", status.as_u16(), e)))?;
        summary_from_response(body)
    }
}

fn summary_from_response(body: OsrmResponse) -> Result<RouteSummary, RoutingError> {
    match body.code.as_str() {
        "Ok" => body
            .routes
            .first()
            .map(|route| RouteSummary {
                total_distance_m: route.distance,
                total_time_s: route.duration,
            })
            .ok_or(RoutingError::NoRoute),
        "NoRoute" | "NoSegment" => Err(RoutingError::NoRoute),
        other => Err(RoutingError::Decode(format!(
            "{}: {}",
            other,
            body.message.unwrap_or_default()
        ))),
    }
}

/// Offline estimate: great-circle distance stretched by a detour factor,
/// driven at a constant average speed.
pub struct StraightLineEngine {
    average_speed_kmh: f64,
    detour_factor: f64,
}

impl StraightLineEngine {
    pub fn new(average_speed_kmh: f64, detour_factor: f64) -> Result<Self, RoutingError> {
        let usable = average_speed_kmh > 0.0 && detour_factor >= 1.0;
        if !usable {
            return Err(RoutingError::Unavailable(format!(
                "straight-line engine needs speed > 0 and detour >= 1 (got {} km/h, x{})",
                average_speed_kmh, detour_factor
            )));
        }
        Ok(Self {
            average_speed_kmh,
            detour_factor,
        })
    }
}

impl RoutingEngine for StraightLineEngine {
    fn compute_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RouteSummary, RoutingError> {
        let km = origin.haversine_km(&destination) * self.detour_factor;
        Ok(RouteSummary {
            total_distance_m: km * 1000.0,
            total_time_s: km / self.average_speed_kmh * 3600.0,
        })
    }
}

/// Builds the engine named in `[routing] engine`.
pub fn engine_from_config(config: &RoutingConfig) -> Result<Arc<dyn RoutingEngine>, RoutingError> {
    match config.engine.as_str() {
        "osrm" => Ok(Arc::new(OsrmEngine::new(
            &config.osrm_url,
            &config.profile,
            Duration::from_secs(config.timeout_secs),
        )?)),
        "straight-line" => Ok(Arc::new(StraightLineEngine::new(
            config.average_speed_kmh,
            config.detour_factor,
        )?)),
        other => Err(RoutingError::Unavailable(format!(
            "unknown routing engine '{}'",
            other
        ))),
    }
}
