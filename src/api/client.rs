use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::api::cache::{CacheTag, TagCache};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::Location;

/// Request body for create and update. The server uses snake_case names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosqueInput {
    pub name: String,
    pub address: String,
    pub eid_time: String,
    pub jummah_time: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<&Location> for MosqueInput {
    fn from(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            address: location.address.clone(),
            eid_time: location.eid_time.clone(),
            jummah_time: location.jummah_time.clone(),
            lat: location.lat,
            lng: location.lng,
        }
    }
}

/// Blocking client for the mosque REST endpoints.
///
/// Reads are cached per path; writes invalidate by tag. Responses are passed
/// through as JSON since the server's record shape is not fixed.
pub struct MosqueApi {
    base_url: String,
    client: reqwest::blocking::Client,
    cache: TagCache,
}

impl MosqueApi {
    pub fn new(config: &ApiConfig, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ApiError::NotConfigured)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            cache: TagCache::default(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn list(&mut self) -> Result<Value, ApiError> {
        self.cached_get("/mosque", &[CacheTag::Mosques])
    }

    pub fn get(&mut self, id: i64) -> Result<Value, ApiError> {
        self.cached_get(
            &format!("/mosque/{}", id),
            &[CacheTag::Mosque, CacheTag::Mosques],
        )
    }

    pub fn create(&mut self, input: &MosqueInput) -> Result<Value, ApiError> {
        let resp = self.client.post(self.url("/mosque")).json(input).send()?;
        let value = read_json(resp)?;
        self.cache.invalidate(&[CacheTag::Mosques]);
        Ok(value)
    }

    pub fn update(&mut self, id: i64, input: &MosqueInput) -> Result<Value, ApiError> {
        let resp = self
            .client
            .put(self.url(&format!("/mosque/{}", id)))
            .json(input)
            .send()?;
        let value = read_json(resp)?;
        self.cache.invalidate(&[CacheTag::Mosque, CacheTag::Mosques]);
        Ok(value)
    }

    fn cached_get(&mut self, path: &str, tags: &[CacheTag]) -> Result<Value, ApiError> {
        if let Some(value) = self.cache.get(path) {
            debug!("api cache hit {}", path);
            return Ok(value.clone());
        }
        debug!("api cache miss {} ({} cached)", path, self.cache.len());
        let resp = self.client.get(self.url(path)).send()?;
        let value = read_json(resp)?;
        self.cache.insert(path, tags, value.clone());
        Ok(value)
    }
}

fn read_json(resp: reqwest::blocking::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    // Some endpoints answer writes with an empty body
    let text = resp.text()?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_locations;

    #[test]
    fn missing_base_url_is_not_configured() {
        let err = MosqueApi::new(&ApiConfig::default(), Duration::from_secs(1)).err();
        assert!(matches!(err, Some(ApiError::NotConfigured)));

        let blank = ApiConfig {
            base_url: Some("  ".to_string()),
            ..ApiConfig::default()
        };
        assert!(matches!(
            MosqueApi::new(&blank, Duration::from_secs(1)).err(),
            Some(ApiError::NotConfigured)
        ));
    }

    #[test]
    fn input_uses_snake_case_wire_names() {
        let seed = seed_locations();
        let body = serde_json::to_value(MosqueInput::from(&seed[1])).unwrap();
        assert_eq!(body["name"], "AN-NOOR");
        assert_eq!(body["eid_time"], "08:00am");
        assert_eq!(body["jummah_time"], "01:30pm");
        assert!(body.get("eidTime").is_none());
    }

    #[test]
    fn urls_join_without_double_slash() {
        let config = ApiConfig {
            base_url: Some("https://api.example.org/".to_string()),
            ..ApiConfig::default()
        };
        let api = MosqueApi::new(&config, Duration::from_secs(1)).unwrap();
        assert_eq!(api.url("/mosque/4"), "https://api.example.org/mosque/4");
    }
}
