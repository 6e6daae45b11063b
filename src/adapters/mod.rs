// Adapters layer: concrete implementations of the domain ports for the map services and the render sinks.

pub mod geocoder;
pub mod place_search;
pub mod sink;
pub mod static_map;

pub use geocoder::HttpGeocoder;
pub use place_search::HttpPlaceFinder;
pub use sink::{DisplaySink, FileSink, NoopSink};
pub use static_map::HttpMapRenderer;
