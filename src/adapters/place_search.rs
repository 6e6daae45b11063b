use crate::config::SearchSettings;
use crate::domain::model::{Coordinate, PlaceRecord, HOURS_NOT_SPECIFIED};
use crate::domain::ports::PlaceFinder;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "place search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Only the first feature is read; later candidates stay untyped.
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Properties {
    #[serde(rename = "CompanyMetaData")]
    company: CompanyMetaData,
}

#[derive(Debug, Deserialize)]
struct CompanyMetaData {
    name: String,
    address: String,
    #[serde(rename = "Hours", default)]
    hours: Option<Hours>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "Phones", default)]
    phones: Vec<Phone>,
}

#[derive(Debug, Deserialize)]
struct Hours {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Phone {
    formatted: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: [f64; 2],
}

/// Nearest-organization lookup; the service's ranking decides "nearest".
pub struct HttpPlaceFinder {
    settings: SearchSettings,
    client: Client,
}

impl HttpPlaceFinder {
    pub fn new(settings: SearchSettings, client: Client) -> Self {
        Self { settings, client }
    }
}

/// `ll` center point, "<latitude>,<longitude>".
pub fn center_param(center: Coordinate) -> String {
    format!("{},{}", center.latitude, center.longitude)
}

#[async_trait]
impl PlaceFinder for HttpPlaceFinder {
    async fn find_nearest(&self, center: Coordinate) -> Result<PlaceRecord> {
        let ll = center_param(center);
        tracing::debug!(
            "Searching '{}' around {} via {}",
            self.settings.text,
            ll,
            self.settings.endpoint
        );

        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[
                ("apikey", self.settings.api_key.as_str()),
                ("text", self.settings.text.as_str()),
                ("lang", self.settings.lang.as_str()),
                ("ll", ll.as_str()),
                ("type", "biz"),
                ("results", "1"),
            ])
            .send()
            .await
            .map_err(|e| LocatorError::SearchError {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("Place search response status: {}", status);
        if !status.is_success() {
            return Err(LocatorError::SearchError {
                message: format!("service returned {}", status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LocatorError::SearchError {
                message: e.to_string(),
            })?;

        parse_search_response(&body)
    }
}

fn parse_search_response(body: &[u8]) -> Result<PlaceRecord> {
    let parsed: SearchResponse =
        serde_json::from_slice(body).map_err(|e| LocatorError::malformed(SERVICE, e.to_string()))?;

    let first = parsed
        .features
        .into_iter()
        .next()
        .ok_or_else(|| LocatorError::NotFoundError {
            message: "no matching place found".to_string(),
        })?;
    let feature: Feature = serde_json::from_value(first)
        .map_err(|e| LocatorError::malformed(SERVICE, e.to_string()))?;

    let company = feature.properties.company;
    let [lon, lat] = feature.geometry.coordinates;

    Ok(PlaceRecord {
        name: company.name,
        address: company.address,
        hours: company
            .hours
            .and_then(|h| h.text)
            .unwrap_or_else(|| HOURS_NOT_SPECIFIED.to_string()),
        coordinate: Coordinate::from_lon_lat(lon, lat),
        url: company.url,
        phone: company.phones.into_iter().next().map(|p| p.formatted),
    })
}
