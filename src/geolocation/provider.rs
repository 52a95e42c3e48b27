use log::warn;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::config::GeolocationConfig;
use crate::error::GeolocationError;
use crate::geolocation::FailureReason;
use crate::models::Coordinates;

/// Source of the user's real-world position. Calls may block; the
/// coordinator runs them off the UI thread.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position pinned in config.
pub struct FixedProvider {
    coords: Coordinates,
}

impl FixedProvider {
    pub fn new(coords: Coordinates) -> Self {
        Self { coords }
    }
}

impl GeolocationProvider for FixedProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.coords)
    }
}

pub struct UnsupportedProvider;

impl GeolocationProvider for UnsupportedProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::new(
            FailureReason::Unsupported,
            "no geolocation provider configured",
        ))
    }
}

/// Coarse position from an IP geolocation service.
///
/// Understands both the `lat`/`lon` shape (ip-api.com) and the
/// `latitude`/`longitude` shape (ipapi.co).
pub struct IpProvider {
    url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct IpLookup {
    status: Option<String>,
    message: Option<String>,
    #[serde(alias = "latitude")]
    lat: Option<f64>,
    #[serde(alias = "longitude")]
    lon: Option<f64>,
    /// Position-error shape used by local position bridges:
    /// `{"error": {"code": 1, "message": "..."}}`.
    error: Option<LookupError>,
}

#[derive(Debug, Deserialize)]
struct LookupError {
    code: u16,
    message: Option<String>,
}

impl IpProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl GeolocationProvider for IpProvider {
    fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(classify_transport)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GeolocationError::new(
                FailureReason::PermissionDenied,
                format!("lookup refused with HTTP {}", status.as_u16()),
            ));
        }
        if !status.is_success() {
            return Err(GeolocationError::new(
                FailureReason::PositionUnavailable,
                format!("lookup returned HTTP {}", status.as_u16()),
            ));
        }

        let body: IpLookup = resp
            .json()
            .map_err(|e| GeolocationError::new(FailureReason::Other, e.to_string()))?;
        lookup_to_coordinates(body)
    }
}

fn classify_transport(err: reqwest::Error) -> GeolocationError {
    let reason = if err.is_timeout() {
        FailureReason::Timeout
    } else if err.is_connect() {
        FailureReason::PositionUnavailable
    } else {
        FailureReason::Other
    };
    GeolocationError::new(reason, err.to_string())
}

fn lookup_to_coordinates(body: IpLookup) -> Result<Coordinates, GeolocationError> {
    if let Some(err) = body.error {
        return Err(GeolocationError::new(
            FailureReason::from_code(err.code),
            err.message.unwrap_or_else(|| format!("lookup error code {}", err.code)),
        ));
    }
    if body.status.as_deref() == Some("fail") {
        return Err(GeolocationError::new(
            FailureReason::PositionUnavailable,
            body.message.unwrap_or_else(|| "lookup failed".to_string()),
        ));
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lng)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) => {
            Ok(Coordinates::new(lat, lng))
        }
        _ => Err(GeolocationError::new(
            FailureReason::Other,
            "lookup response had no usable coordinates",
        )),
    }
}

/// Builds the provider named in `[geolocation] provider`. A provider that
/// cannot be built degrades to `UnsupportedProvider` so locating reports a
/// normal failure instead of aborting startup.
pub fn provider_from_config(config: &GeolocationConfig) -> Arc<dyn GeolocationProvider> {
    match config.provider.as_str() {
        "fixed" => match (config.latitude, config.longitude) {
            (Some(lat), Some(lng)) => Arc::new(FixedProvider::new(Coordinates::new(lat, lng))),
            _ => {
                warn!("geolocation provider 'fixed' needs latitude and longitude; locating disabled");
                Arc::new(UnsupportedProvider)
            }
        },
        "ip" => match IpProvider::new(
            &config.ip_lookup_url,
            Duration::from_secs(config.timeout_secs),
        ) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                warn!("could not build IP geolocation client: {}", e);
                Arc::new(UnsupportedProvider)
            }
        },
        "none" => Arc::new(UnsupportedProvider),
        other => {
            warn!("unknown geolocation provider '{}'; locating disabled", other);
            Arc::new(UnsupportedProvider)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(json: &str) -> Result<Coordinates, GeolocationError> {
        lookup_to_coordinates(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn reads_both_lookup_shapes() {
        assert_eq!(
            lookup(r#"{"status":"success","lat":9.05,"lon":7.49}"#),
            Ok(Coordinates::new(9.05, 7.49))
        );
        assert_eq!(
            lookup(r#"{"latitude":9.05,"longitude":7.49}"#),
            Ok(Coordinates::new(9.05, 7.49))
        );
    }

    #[test]
    fn failed_lookup_is_position_unavailable() {
        let err = lookup(r#"{"status":"fail","message":"private range"}"#).unwrap_err();
        assert_eq!(err.reason, FailureReason::PositionUnavailable);
        assert_eq!(err.detail, "private range");
    }

    #[test]
    fn error_codes_map_to_reasons() {
        let err = lookup(r#"{"error":{"code":1,"message":"User denied Geolocation"}}"#).unwrap_err();
        assert_eq!(err.reason, FailureReason::PermissionDenied);
        let err = lookup(r#"{"error":{"code":3}}"#).unwrap_err();
        assert_eq!(err.reason, FailureReason::Timeout);
        assert_eq!(err.detail, "lookup error code 3");
    }

    #[test]
    fn missing_coordinates_is_other() {
        let err = lookup(r#"{"status":"success"}"#).unwrap_err();
        assert_eq!(err.reason, FailureReason::Other);
    }

    #[test]
    fn fixed_without_coordinates_is_unsupported() {
        let config = GeolocationConfig {
            provider: "fixed".to_string(),
            latitude: Some(9.1),
            longitude: None,
            ..GeolocationConfig::default()
        };
        let err = provider_from_config(&config).current_position().unwrap_err();
        assert_eq!(err.reason, FailureReason::Unsupported);
    }

    #[test]
    fn fixed_provider_returns_configured_point() {
        let config = GeolocationConfig {
            provider: "fixed".to_string(),
            latitude: Some(9.1),
            longitude: Some(7.4),
            ..GeolocationConfig::default()
        };
        assert_eq!(
            provider_from_config(&config).current_position(),
            Ok(Coordinates::new(9.1, 7.4))
        );
    }
}
