//! End-to-end town generation: allocate, place, route, render

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::allocation::{self, AllocationPlan, CategoryMix};
use crate::core::config::TownConfig;
use crate::core::error::{Result, TownError};
use crate::layout::{place, Layout, LayoutSurface};
use crate::render::{render, Canvas};
use crate::report::TownReport;
use crate::roads::{route, RoadSegment};

/// Inputs for one generation
#[derive(Debug, Clone, PartialEq)]
pub struct TownRequest {
    pub population: u64,
    /// Land area in area units (square kilometers in reports)
    pub area: f64,
    /// Class mix; the standard split when `None`
    pub mix: Option<CategoryMix>,
    /// Seed for placement; the same seed reproduces the same map
    pub seed: u64,
}

impl TownRequest {
    pub fn new(population: u64, area: f64) -> Self {
        Self {
            population,
            area,
            mix: None,
            seed: 0,
        }
    }

    pub fn with_mix(mut self, mix: CategoryMix) -> Self {
        self.mix = Some(mix);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Everything one generation produced; owned by the caller
#[derive(Debug, Clone)]
pub struct Town {
    pub seed: u64,
    pub plan: AllocationPlan,
    pub layout: Layout,
    pub roads: Vec<RoadSegment>,
    pub canvas: Canvas,
    pub elapsed: Duration,
}

impl Town {
    pub fn report(&self) -> TownReport {
        TownReport::new(self)
    }
}

/// Run the full pipeline for one request.
///
/// Fails only on invalid input or config; buildings that do not fit are
/// dropped, not reported as errors.
pub fn generate(request: &TownRequest, config: &TownConfig) -> Result<Town> {
    config.validate().map_err(TownError::Config)?;
    let start = Instant::now();

    let mix = request.mix.clone().unwrap_or_default();
    let plan = allocation::plan(request.population, request.area, &mix, &config.allocation)?;
    let descriptors = plan.descriptors();
    tracing::info!(
        population = request.population,
        area = request.area,
        buildings = descriptors.len(),
        "allocated buildings"
    );

    let surface = LayoutSurface::for_area(request.area, &config.layout);
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    let layout = place(&descriptors, surface, &config.layout, &mut rng);

    let roads = route(&layout.placed, &config.roads);
    let canvas = render(
        surface.width,
        surface.height,
        &layout.placed,
        &roads,
        &config.render,
    );

    let elapsed = start.elapsed();
    tracing::info!(
        placed = layout.placed.len(),
        dropped = layout.dropped.len(),
        roads = roads.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "town generated"
    );

    Ok(Town {
        seed: request.seed,
        plan,
        layout,
        roads,
        canvas,
        elapsed,
    })
}
