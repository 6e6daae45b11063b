pub mod driver;

pub use crate::domain::model::{Coordinate, MapImage, PipelineResult, PlaceRecord};
pub use crate::domain::ports::{AddressResolver, MapRenderer, PlaceFinder, RenderSink};
pub use crate::utils::error::Result;
pub use driver::{PipelineDriver, Stage};
