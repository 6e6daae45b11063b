use crate::config::StaticMapSettings;
use crate::domain::model::{Coordinate, MapImage};
use crate::domain::ports::MapRenderer;
use crate::utils::error::{LocatorError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub struct HttpMapRenderer {
    settings: StaticMapSettings,
    client: Client,
}

impl HttpMapRenderer {
    pub fn new(settings: StaticMapSettings, client: Client) -> Self {
        Self { settings, client }
    }

    /// `<lon1>,<lat1>,<style1>~<lon2>,<lat2>,<style2>`
    pub fn points_param(&self, origin: Coordinate, place: Coordinate) -> String {
        let (origin_lon, origin_lat) = origin.lon_lat();
        let (place_lon, place_lat) = place.lon_lat();
        format!(
            "{},{},{}~{},{},{}",
            origin_lon,
            origin_lat,
            self.settings.origin_style,
            place_lon,
            place_lat,
            self.settings.place_style
        )
    }
}

#[async_trait]
impl MapRenderer for HttpMapRenderer {
    async fn render(&self, origin: Coordinate, place: Coordinate) -> Result<MapImage> {
        let pt = self.points_param(origin, place);
        tracing::debug!("Requesting static map pt={} via {}", pt, self.settings.endpoint);

        let response = self
            .client
            .get(&self.settings.endpoint)
            .query(&[
                ("l", "map"),
                ("pt", pt.as_str()),
                ("apikey", self.settings.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LocatorError::RenderError {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("Static map response status: {}", status);
        if !status.is_success() {
            return Err(LocatorError::RenderError {
                message: format!("service returned {}", status),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LocatorError::RenderError {
                message: e.to_string(),
            })?;

        let map = MapImage::decode(bytes.to_vec())?;
        tracing::debug!(
            "Decoded {:?} map {}x{} ({} bytes)",
            map.format,
            map.width,
            map.height,
            map.bytes.len()
        );
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Cursor;

    fn renderer(server: &MockServer) -> HttpMapRenderer {
        HttpMapRenderer::new(
            StaticMapSettings {
                endpoint: server.url("/1.x"),
                api_key: "map-key".to_string(),
                origin_style: "pm2rdl".to_string(),
                place_style: "pm2grl".to_string(),
            },
            Client::new(),
        )
    }

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::new(8, 6))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_render_requests_both_points() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/1.x")
                .query_param("l", "map")
                .query_param("pt", "37.62,55.75,pm2rdl~37.615,55.757,pm2grl")
                .query_param("apikey", "map-key");
            then.status(200)
                .header("Content-Type", "image/png")
                .body(png_bytes());
        });

        let map = renderer(&server)
            .render(Coordinate::new(55.75, 37.62), Coordinate::new(55.757, 37.615))
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(map.format, image::ImageFormat::Png);
        assert_eq!((map.width, map.height), (8, 6));
    }

    #[tokio::test]
    async fn test_render_http_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/1.x");
            then.status(403);
        });

        let err = renderer(&server)
            .render(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::RenderError { .. }));
    }

    #[tokio::test]
    async fn test_render_undecodable_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/1.x");
            then.status(200).body("not an image");
        });

        let err = renderer(&server)
            .render(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0))
            .await
            .unwrap_err();
        assert!(matches!(err, LocatorError::ImageDecode(_)));
    }

    #[test]
    fn test_points_param_with_custom_styles() {
        let server = MockServer::start();
        let mut renderer = renderer(&server);
        renderer.settings.origin_style = "pm2blm".to_string();
        assert_eq!(
            renderer.points_param(Coordinate::new(-33.5, 151.25), Coordinate::new(1.0, -2.0)),
            "151.25,-33.5,pm2blm~-2,1,pm2grl"
        );
    }
}
