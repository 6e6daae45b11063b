use crate::config::GeocoderSettings;
use crate::domain::model::Coordinate;
use crate::domain::ports::AddressResolver;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "geocoder";

#[derive(Debug, Deserialize)]
struct GeocoderResponse {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(rename = "GeoObjectCollection")]
    collection: GeoObjectCollection,
}

#[derive(Debug, Deserialize)]
struct GeoObjectCollection {
    // Only the first member is read; later candidates stay untyped.
    #[serde(rename = "featureMember")]
    feature_member: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FeatureMember {
    #[serde(rename = "GeoObject")]
    geo_object: GeoObject,
}

#[derive(Debug, Deserialize)]
struct GeoObject {
    #[serde(rename = "Point")]
    point: Point,
    #[serde(rename = "metaDataProperty", default)]
    meta_data: Option<MetaDataProperty>,
}

#[derive(Debug, Deserialize)]
struct Point {
    pos: String,
}

#[derive(Debug, Deserialize)]
struct MetaDataProperty {
    #[serde(rename = "GeocoderMetaData", default)]
    geocoder: Option<GeocoderMetaData>,
}

#[derive(Debug, Deserialize)]
struct GeocoderMetaData {
    #[serde(default)]
    text: Option<String>,
}

/// Address resolution against a Yandex-style geocoder.
pub struct HttpGeocoder {
    settings: GeocoderSettings,
    client: Client,
}

impl HttpGeocoder {
    pub fn new(settings: GeocoderSettings, client: Client) -> Self {
        Self { settings, client }
    }
}

#[async_trait]
impl AddressResolver for HttpGeocoder {
    async fn resolve(&self, address: &str) -> Result<Coordinate> {
        tracing::debug!("Geocoding '{}' via {}", address, self.settings.endpoint);

        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[
                ("apikey", self.settings.api_key.as_str()),
                ("geocode", address),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| LocatorError::ResolutionError {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("Geocoder response status: {}", status);
        if !status.is_success() {
            return Err(LocatorError::ResolutionError {
                message: format!("service returned {}", status),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LocatorError::ResolutionError {
                message: e.to_string(),
            })?;

        parse_geocoder_response(&body)
    }
}

fn parse_geocoder_response(body: &[u8]) -> Result<Coordinate> {
    let parsed: GeocoderResponse =
        serde_json::from_slice(body).map_err(|e| LocatorError::malformed(SERVICE, e.to_string()))?;

    let first = parsed
        .response
        .collection
        .feature_member
        .into_iter()
        .next()
        .ok_or_else(|| LocatorError::malformed(SERVICE, "response contains no features"))?;
    let toponym = serde_json::from_value::<FeatureMember>(first)
        .map_err(|e| LocatorError::malformed(SERVICE, e.to_string()))?
        .geo_object;

    if let Some(text) = toponym
        .meta_data
        .and_then(|m| m.geocoder)
        .and_then(|g| g.text)
    {
        tracing::info!("Address resolved to: {}", text);
    }

    parse_pos(&toponym.point.pos)
}

/// `pos` is "<longitude> <latitude>".
fn parse_pos(pos: &str) -> Result<Coordinate> {
    let values = pos
        .split_whitespace()
        .map(|part| part.parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| LocatorError::malformed(SERVICE, format!("bad position '{}': {}", pos, e)))?;

    match values.as_slice() {
        [lon, lat] => Ok(Coordinate::from_lon_lat(*lon, *lat)),
        _ => Err(LocatorError::malformed(
            SERVICE,
            format!("position '{}' is not a longitude/latitude pair", pos),
        )),
    }
}
