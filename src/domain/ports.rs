use crate::domain::model::{Coordinate, MapImage, PlaceRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<Coordinate>;
}

#[async_trait]
pub trait PlaceFinder: Send + Sync {
    async fn find_nearest(&self, center: Coordinate) -> Result<PlaceRecord>;
}

#[async_trait]
pub trait MapRenderer: Send + Sync {
    async fn render(&self, origin: Coordinate, place: Coordinate) -> Result<MapImage>;
}

/// Where a rendered map ends up. Returns the path when the map was saved
/// somewhere the user asked for.
pub trait RenderSink: Send + Sync {
    fn present(&self, map: &MapImage) -> Result<Option<PathBuf>>;
}

impl RenderSink for Box<dyn RenderSink> {
    fn present(&self, map: &MapImage) -> Result<Option<PathBuf>> {
        self.as_ref().present(map)
    }
}
