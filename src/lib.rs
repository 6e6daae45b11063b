pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{DisplaySink, FileSink, HttpGeocoder, HttpMapRenderer, HttpPlaceFinder, NoopSink};
pub use config::Settings;
pub use crate::core::{PipelineDriver, Stage};
pub use domain::distance::haversine_km;
pub use utils::error::{LocatorError, Result};
