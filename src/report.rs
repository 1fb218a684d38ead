//! Town summary and serialization

use serde::{Deserialize, Serialize};

use crate::allocation::{BuildingClass, SizeTier, SQ_METERS_PER_SQ_KM};
use crate::core::error::Result;
use crate::town::Town;

/// Serializable summary of one generated town
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TownReport {
    pub population: u64,
    /// Input area (square kilometers)
    pub area: f64,
    pub seed: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub statistics: TownStats,
    pub classes: Vec<ClassReport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TownStats {
    /// Building total before rounding, as computed from population and area
    pub total_buildings_raw: f64,
    pub total_buildings: u64,
    pub avg_people_per_building: f64,
    pub buildings_allocated: u64,
    pub buildings_placed: u64,
    pub buildings_dropped: u64,
    pub roads: u64,
    pub road_length_px: i64,
    pub generation_time_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassReport {
    pub class: BuildingClass,
    pub share: f64,
    pub footprint_multiplier: f64,
    pub buildings: u32,
    pub placed: u32,
    pub dropped: u32,
    pub tiers: Vec<TierReport>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierReport {
    pub tier: SizeTier,
    pub count: u32,
    /// Footprint per building in input units
    pub footprint_area: f64,
    /// Footprint per building assuming the input area is in km²
    pub footprint_m2: f64,
    pub people_per_building: f64,
    pub capped: bool,
}

impl TownReport {
    pub fn new(town: &Town) -> Self {
        let plan = &town.plan;
        let layout = &town.layout;

        let classes = plan
            .classes
            .iter()
            .map(|class| ClassReport {
                class: class.class,
                share: class.share,
                footprint_multiplier: class.footprint_multiplier,
                buildings: class.building_count,
                placed: layout.placed_count(class.class) as u32,
                dropped: layout.dropped_count(class.class) as u32,
                tiers: class
                    .tiers
                    .iter()
                    .map(|tier| TierReport {
                        tier: tier.tier,
                        count: tier.count,
                        footprint_area: tier.footprint_area,
                        footprint_m2: tier.footprint_area * SQ_METERS_PER_SQ_KM,
                        people_per_building: tier.capacity,
                        capped: tier.capped,
                    })
                    .collect(),
            })
            .collect();

        Self {
            population: plan.population,
            area: plan.area,
            seed: town.seed,
            canvas_width: layout.surface.width,
            canvas_height: layout.surface.height,
            statistics: TownStats {
                total_buildings_raw: plan.total_buildings,
                total_buildings: plan.total_buildings.round() as u64,
                avg_people_per_building: plan.avg_people_per_building(),
                buildings_allocated: plan.building_count(),
                buildings_placed: layout.placed.len() as u64,
                buildings_dropped: layout.dropped.len() as u64,
                roads: town.roads.len() as u64,
                road_length_px: town.roads.iter().map(|r| r.length()).sum(),
                generation_time_ms: town.elapsed.as_millis() as u64,
            },
            classes,
        }
    }

    pub fn class(&self, class: BuildingClass) -> Option<&ClassReport> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} people on {} km² -> {} buildings ({} placed, {} dropped), {} roads on a {}x{} map in {}ms\n\
             Average people per building: {:.2}",
            self.population,
            self.area,
            self.statistics.buildings_allocated,
            self.statistics.buildings_placed,
            self.statistics.buildings_dropped,
            self.statistics.roads,
            self.canvas_width,
            self.canvas_height,
            self.statistics.generation_time_ms,
            self.statistics.avg_people_per_building,
        )
    }

    /// Per-class breakdown, one line per tier
    pub fn breakdown(&self) -> String {
        let mut out = String::new();
        for class in &self.classes {
            out.push_str(&format!(
                "{:<12} share {:>5.1}%  buildings {:>4} (placed {}, dropped {})\n",
                class.class.name(),
                class.share * 100.0,
                class.buildings,
                class.placed,
                class.dropped,
            ));
            for tier in class.tiers.iter().filter(|t| t.count > 0) {
                out.push_str(&format!(
                    "  {:<7} {:>4} x {:>12.2} m², {:>8.2} people each{}\n",
                    format!("{:?}", tier.tier),
                    tier.count,
                    tier.footprint_m2,
                    tier.people_per_building,
                    if tier.capped { " (capped)" } else { "" },
                ));
            }
        }
        out
    }
}
