//! Turn (population, area, mix) into building counts and footprints
//!
//! The allocator is pure: the same inputs and config always give the same
//! plan. Land and occupants are split in three stages:
//!
//! 1. class: land proportional to `share * (1 + slope * share)`, occupants
//!    proportional to `share`
//! 2. tier: both split by the class's size multipliers
//! 3. building: a tier's land and occupants divided evenly among its units,
//!    with the per-building footprint capped at a fraction of the total area

use serde::{Deserialize, Serialize};

use crate::allocation::{BuildingClass, CategoryMix, SizeTier, TIER_COUNT};
use crate::core::config::AllocationConfig;
use crate::core::error::{Result, TownError};

/// Square meters per square kilometer, for reports on km² inputs
pub const SQ_METERS_PER_SQ_KM: f64 = 1_000_000.0;

/// One building to be placed: the allocator's output unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescriptor {
    pub class: BuildingClass,
    pub tier: SizeTier,
    /// Ground area in input area units
    pub footprint_area: f64,
    /// People housed, employed or served
    pub capacity: f64,
}

/// Allocation of one size tier within a class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPlan {
    pub tier: SizeTier,
    pub count: u32,
    /// Footprint of each building in this tier (area units)
    pub footprint_area: f64,
    /// Occupants of each building in this tier
    pub capacity: f64,
    /// Whether the footprint cap reduced `footprint_area`
    pub capped: bool,
}

/// Allocation of one building class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPlan {
    pub class: BuildingClass,
    /// Normalized share of the mix
    pub share: f64,
    pub footprint_multiplier: f64,
    /// Land assigned to the class before the footprint cap
    pub land_area: f64,
    pub occupants: f64,
    pub building_count: u32,
    pub tiers: [TierPlan; TIER_COUNT],
}

/// Complete allocation for one town
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub population: u64,
    pub area: f64,
    /// The normalized mix the plan was computed from
    pub mix: CategoryMix,
    /// Unrounded building total before the per-class split
    pub total_buildings: f64,
    pub classes: Vec<ClassPlan>,
}

impl AllocationPlan {
    /// Number of descriptors the plan emits
    pub fn building_count(&self) -> u64 {
        self.classes.iter().map(|c| u64::from(c.building_count)).sum()
    }

    pub fn class(&self, class: BuildingClass) -> Option<&ClassPlan> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn avg_people_per_building(&self) -> f64 {
        if self.total_buildings > 0.0 {
            self.population as f64 / self.total_buildings
        } else {
            0.0
        }
    }

    /// Expand the plan into one descriptor per building, class then tier
    pub fn descriptors(&self) -> Vec<BuildingDescriptor> {
        let mut out = Vec::with_capacity(self.building_count() as usize);
        for class in &self.classes {
            for tier in &class.tiers {
                let descriptor = BuildingDescriptor {
                    class: class.class,
                    tier: tier.tier,
                    footprint_area: tier.footprint_area,
                    capacity: tier.capacity,
                };
                out.extend(std::iter::repeat(descriptor).take(tier.count as usize));
            }
        }
        out
    }
}

/// Compute the full allocation plan.
///
/// Fails with `InvalidInput` for a zero population, a non-positive or
/// non-finite area, a mix that cannot be normalized, or a town needing more
/// than `config.max_buildings` buildings.
pub fn plan(
    population: u64,
    area: f64,
    mix: &CategoryMix,
    config: &AllocationConfig,
) -> Result<AllocationPlan> {
    if population == 0 {
        return Err(TownError::InvalidInput("population must be greater than 0".into()));
    }
    if !(area > 0.0) || !area.is_finite() {
        return Err(TownError::InvalidInput(format!("area must be a positive number, got {}", area)));
    }
    let mix = mix.normalized()?;

    let multiplier = |share: f64| 1.0 + config.footprint_multiplier_slope * share;
    let weighted_sum: f64 = mix.iter().map(|(_, share)| share * multiplier(share)).sum();

    let total_buildings = total_buildings(population, area, config);
    if !(total_buildings.round() <= config.max_buildings as f64) {
        return Err(TownError::InvalidInput(format!(
            "{} people on {} area units need {:.0} buildings, more than the limit of {}",
            population, area, total_buildings, config.max_buildings
        )));
    }
    let max_footprint = config.max_footprint_fraction * area;

    let classes = mix
        .iter()
        .map(|(class, share)| {
            let footprint_multiplier = multiplier(share);
            let building_count = class_count(total_buildings, share)?;
            let land_area = area * (share * footprint_multiplier / weighted_sum);
            let occupants = population as f64 * share;
            let counts = split_tiers(building_count, &config.tier_proportions);
            let tiers = plan_tiers(class, counts, land_area, occupants, max_footprint);

            tracing::debug!(
                class = %class,
                share,
                building_count,
                ?counts,
                land_area,
                "allocated class"
            );

            Ok(ClassPlan {
                class,
                share,
                footprint_multiplier,
                land_area,
                occupants,
                building_count,
                tiers,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllocationPlan {
        population,
        area,
        mix,
        total_buildings,
        classes,
    })
}

/// Compute building descriptors in class-then-tier order
pub fn allocate(
    population: u64,
    area: f64,
    mix: &CategoryMix,
    config: &AllocationConfig,
) -> Result<Vec<BuildingDescriptor>> {
    Ok(plan(population, area, mix, config)?.descriptors())
}

/// `(population / base_pop) * max(1, area / base_area) ^ damping`
pub fn total_buildings(population: u64, area: f64, config: &AllocationConfig) -> f64 {
    let pop_component = population as f64 / config.base_population_per_building;
    let area_component = (area / config.base_area_per_building)
        .max(1.0)
        .powf(config.area_damping_exponent);
    pop_component * area_component
}

/// Rounded building count of one class, rejected if it does not fit a `u32`
fn class_count(total_buildings: f64, share: f64) -> Result<u32> {
    let count = (total_buildings * share).round();
    if !(count >= 0.0 && count <= u32::MAX as f64) {
        return Err(TownError::InvalidInput(format!(
            "class building count {} is out of range",
            count
        )));
    }
    Ok(count as u32)
}

/// Split `count` buildings across the size tiers.
///
/// Every tier gets at least one building when `count` allows it, and the
/// counts always sum to `count`. Rounding leftovers go to the first tier.
/// With fewer buildings than tiers the smallest tiers are filled first.
pub fn split_tiers(count: u32, proportions: &[f64; TIER_COUNT]) -> [u32; TIER_COUNT] {
    let mut counts = [0u32; TIER_COUNT];
    if count == 0 {
        return counts;
    }
    if (count as usize) < TIER_COUNT {
        for slot in counts.iter_mut().take(count as usize) {
            *slot = 1;
        }
        return counts;
    }

    let total: f64 = proportions.iter().sum();
    for (slot, p) in counts.iter_mut().zip(proportions) {
        *slot = ((count as f64 * p / total).floor() as u32).max(1);
    }

    // Summed in u64: the per-tier minimums can push past u32::MAX
    let assigned: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    let target = u64::from(count);
    if assigned <= target {
        counts[0] += (target - assigned) as u32;
    } else {
        // Minimums overshot; take back from the fullest tiers
        for _ in 0..(assigned - target) {
            let fullest = (0..TIER_COUNT)
                .max_by_key(|&i| (counts[i], std::cmp::Reverse(i)))
                .unwrap_or(0);
            counts[fullest] -= 1;
        }
    }
    counts
}

fn plan_tiers(
    class: BuildingClass,
    counts: [u32; TIER_COUNT],
    land_area: f64,
    occupants: f64,
    max_footprint: f64,
) -> [TierPlan; TIER_COUNT] {
    let sizes = class.size_multipliers();
    // Only occupied tiers take part, so no land or people are lost to empty tiers
    let occupied_size: f64 = sizes
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(s, _)| *s)
        .sum();

    SizeTier::ALL.map(|tier| {
        let i = tier.index();
        let count = counts[i];
        if count == 0 || occupied_size <= 0.0 {
            return TierPlan {
                tier,
                count,
                footprint_area: 0.0,
                capacity: 0.0,
                capped: false,
            };
        }
        let fraction = sizes[i] / occupied_size;
        let raw_footprint = land_area * fraction / count as f64;
        TierPlan {
            tier,
            count,
            footprint_area: raw_footprint.min(max_footprint),
            capacity: occupants * fraction / count as f64,
            capped: raw_footprint > max_footprint,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_mix() -> CategoryMix {
        CategoryMix::new()
            .with_share(BuildingClass::Residential, 0.5)
            .with_share(BuildingClass::Commerce, 0.2)
            .with_share(BuildingClass::Industry, 0.2)
            .with_share(BuildingClass::Recreation, 0.1)
    }

    #[test]
    fn test_total_buildings_formula() {
        let config = AllocationConfig::default();
        // 1000 / 40 * sqrt(10)
        let expected = 25.0 * 10f64.sqrt();
        assert!((total_buildings(1000, 10.0, &config) - expected).abs() < 1e-9);
        // Areas below one unit do not shrink the count
        assert!((total_buildings(1000, 0.25, &config) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_tiers_default_proportions() {
        let p = [0.4, 0.4, 0.2];
        assert_eq!(split_tiers(0, &p), [0, 0, 0]);
        assert_eq!(split_tiers(1, &p), [1, 0, 0]);
        assert_eq!(split_tiers(2, &p), [1, 1, 0]);
        assert_eq!(split_tiers(3, &p), [1, 1, 1]);
        assert_eq!(split_tiers(4, &p), [2, 1, 1]);
        assert_eq!(split_tiers(10, &p), [4, 4, 2]);
        assert_eq!(split_tiers(11, &p), [5, 4, 2]);
        assert_eq!(split_tiers(40, &p), [16, 16, 8]);
    }

    #[test]
    fn test_split_tiers_overshoot_is_taken_back() {
        // Floors of 1 on the small tiers overshoot a count of 4
        let p = [0.9, 0.05, 0.05];
        let counts = split_tiers(4, &p);
        assert_eq!(counts.iter().sum::<u32>(), 4);
        assert!(counts.iter().all(|&c| c >= 1));
    }

    #[test]
    fn test_plan_example_town() {
        let plan = plan(1000, 10.0, &example_mix(), &AllocationConfig::default()).unwrap();

        assert!(plan.total_buildings > 0.0);
        for class in &plan.classes {
            assert!(class.building_count > 0, "{} got no buildings", class.class);
            let tier_sum: u32 = class.tiers.iter().map(|t| t.count).sum();
            assert_eq!(tier_sum, class.building_count);
        }

        let residential = plan.class(BuildingClass::Residential).unwrap();
        assert_eq!(residential.building_count, 40); // round(79.06 * 0.5)
        assert!((residential.footprint_multiplier - 3.5).abs() < 1e-12);

        let descriptors = plan.descriptors();
        assert_eq!(descriptors.len() as u64, plan.building_count());
        assert_eq!(descriptors[0].class, BuildingClass::Residential);
        assert_eq!(descriptors[0].tier, SizeTier::Small);
        assert_eq!(descriptors.last().unwrap().class, BuildingClass::Recreation);
    }

    #[test]
    fn test_occupants_are_preserved() {
        let plan = plan(1000, 10.0, &example_mix(), &AllocationConfig::default()).unwrap();
        let housed: f64 = plan.descriptors().iter().map(|d| d.capacity).sum();
        assert!((housed - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_uncapped_land_is_fully_used() {
        let plan = plan(1000, 10.0, &example_mix(), &AllocationConfig::default()).unwrap();
        assert!(plan.classes.iter().all(|c| c.tiers.iter().all(|t| !t.capped)));
        let used: f64 = plan.descriptors().iter().map(|d| d.footprint_area).sum();
        assert!((used - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_footprint_cap_binds_for_tiny_counts() {
        // Four buildings share all the land, so uncapped lots would be huge
        let mix = CategoryMix::new().with_share(BuildingClass::Industry, 1.0);
        let plan = plan(120, 2.0, &mix, &AllocationConfig::default()).unwrap();
        let industry = plan.class(BuildingClass::Industry).unwrap();
        assert!(industry.tiers.iter().any(|t| t.capped));
        for d in plan.descriptors() {
            assert!(d.footprint_area <= 0.1 * 2.0 + 1e-12);
        }
    }

    #[test]
    fn test_zero_share_class_gets_nothing() {
        let mix = CategoryMix::new()
            .with_share(BuildingClass::Residential, 1.0)
            .with_share(BuildingClass::Recreation, 0.0);
        let plan = plan(1000, 4.0, &mix, &AllocationConfig::default()).unwrap();
        assert_eq!(plan.class(BuildingClass::Recreation).unwrap().building_count, 0);
        assert!(plan
            .descriptors()
            .iter()
            .all(|d| d.class == BuildingClass::Residential));
    }

    #[test]
    fn test_huge_population_is_rejected_not_saturated() {
        let config = AllocationConfig::default();
        let result = plan(1_000_000_000_000, 1.0, &CategoryMix::standard(), &config);
        assert!(matches!(result, Err(TownError::InvalidInput(_))));
    }

    #[test]
    fn test_building_limit_is_configurable() {
        let config = AllocationConfig {
            max_buildings: 10,
            ..AllocationConfig::default()
        };
        // 400 / 40 = 10 buildings sits exactly on the limit
        let at_limit = plan(400, 1.0, &CategoryMix::standard(), &config).unwrap();
        assert_eq!(at_limit.building_count(), 10);
        assert!(matches!(
            plan(440, 1.0, &CategoryMix::standard(), &config),
            Err(TownError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_large_counts_sum_without_overflow() {
        // Class counts near u32::MAX must still add up in u64
        let config = AllocationConfig {
            max_buildings: 12_000_000_000,
            ..AllocationConfig::default()
        };
        let mix = CategoryMix::new()
            .with_share(BuildingClass::Residential, 0.35)
            .with_share(BuildingClass::Industry, 0.35)
            .with_share(BuildingClass::Recreation, 0.3);
        let plan = plan(400_000_000_000, 1.0, &mix, &config).unwrap();
        assert_eq!(plan.building_count(), 10_000_000_000);
        for class in &plan.classes {
            let tier_sum: u64 = class.tiers.iter().map(|t| u64::from(t.count)).sum();
            assert_eq!(tier_sum, u64::from(class.building_count));
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let config = AllocationConfig::default();
        let mix = example_mix();
        assert!(matches!(plan(0, 10.0, &mix, &config), Err(TownError::InvalidInput(_))));
        assert!(matches!(plan(100, 0.0, &mix, &config), Err(TownError::InvalidInput(_))));
        assert!(matches!(plan(100, -1.0, &mix, &config), Err(TownError::InvalidInput(_))));
        assert!(matches!(plan(100, f64::NAN, &mix, &config), Err(TownError::InvalidInput(_))));
        assert!(matches!(
            allocate(100, 1.0, &CategoryMix::new(), &config),
            Err(TownError::InvalidInput(_))
        ));
    }
}
