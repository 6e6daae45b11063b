use crate::adapters::{HttpGeocoder, HttpMapRenderer, HttpPlaceFinder};
use crate::config::Settings;
use crate::domain::distance::haversine_km;
use crate::domain::model::PipelineResult;
use crate::domain::ports::{AddressResolver, MapRenderer, PlaceFinder, RenderSink};
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Resolving,
    Searching,
    Computing,
    Rendering,
    Done,
    Failed,
}

/// Runs resolve, search, distance and render in order, reporting each step to `out`.
/// The first failure stops the run.
pub struct PipelineDriver<R, F, M, S>
where
    R: AddressResolver,
    F: PlaceFinder,
    M: MapRenderer,
    S: RenderSink,
{
    resolver: R,
    finder: F,
    renderer: M,
    sink: S,
    stage: Stage,
    failed_at: Option<Stage>,
}

impl<R, F, M, S> PipelineDriver<R, F, M, S>
where
    R: AddressResolver,
    F: PlaceFinder,
    M: MapRenderer,
    S: RenderSink,
{
    pub fn new(resolver: R, finder: F, renderer: M, sink: S) -> Self {
        Self {
            resolver,
            finder,
            renderer,
            sink,
            stage: Stage::Idle,
            failed_at: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The stage that was running when the pipeline failed.
    pub fn failed_at(&self) -> Option<Stage> {
        self.failed_at
    }

    pub async fn run<W: Write>(&mut self, address: &str, out: &mut W) -> Result<PipelineResult> {
        match self.run_stages(address, out).await {
            Ok(result) => {
                self.stage = Stage::Done;
                match serde_json::to_string(&result) {
                    Ok(json) => tracing::debug!("Pipeline result: {}", json),
                    Err(e) => tracing::debug!("Pipeline result not serializable: {}", e),
                }
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(
                    "Pipeline failed while {:?}: {} (category: {:?}, suggestion: {})",
                    self.stage,
                    e,
                    e.category(),
                    e.recovery_suggestion()
                );
                self.failed_at = Some(self.stage);
                self.stage = Stage::Failed;
                Err(e)
            }
        }
    }

    async fn run_stages<W: Write>(&mut self, address: &str, out: &mut W) -> Result<PipelineResult> {
        writeln!(out, "Source address: {}", address)?;

        self.stage = Stage::Resolving;
        let origin = self.resolver.resolve(address).await?;
        writeln!(out, "Address coordinates: {}", origin)?;

        self.stage = Stage::Searching;
        let place = self.finder.find_nearest(origin).await?;
        writeln!(out)?;
        writeln!(out, "Found pharmacy:")?;
        writeln!(out, "Name: {}", place.name)?;
        writeln!(out, "Address: {}", place.address)?;
        writeln!(out, "Opening hours: {}", place.hours)?;
        if let Some(phone) = &place.phone {
            writeln!(out, "Phone: {}", phone)?;
        }
        if let Some(url) = &place.url {
            writeln!(out, "Website: {}", url)?;
        }

        self.stage = Stage::Computing;
        let distance_km = haversine_km(origin, place.coordinate);
        writeln!(out, "Distance to pharmacy: {:.2} km", distance_km)?;

        self.stage = Stage::Rendering;
        let map = self.renderer.render(origin, place.coordinate).await?;
        if let Some(path) = self.sink.present(&map)? {
            writeln!(out, "Map saved to: {}", path.display())?;
        }

        Ok(PipelineResult {
            address: address.to_string(),
            origin,
            place,
            distance_km,
        })
    }
}

impl<S: RenderSink> PipelineDriver<HttpGeocoder, HttpPlaceFinder, HttpMapRenderer, S> {
    /// Wires the HTTP components from `settings`; they share one client.
    pub fn from_settings(settings: &Settings, sink: S) -> Result<Self> {
        let client = settings.http_client()?;
        Ok(Self::new(
            HttpGeocoder::new(settings.geocoder.clone(), client.clone()),
            HttpPlaceFinder::new(settings.search.clone(), client.clone()),
            HttpMapRenderer::new(settings.static_map.clone(), client),
            sink,
        ))
    }
}
