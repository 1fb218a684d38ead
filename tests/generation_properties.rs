//! Property tests for allocation, placement, routing and rendering

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use town_planner::allocation::{allocate, plan, BuildingClass, CategoryMix};
use town_planner::core::config::{AllocationConfig, LayoutConfig, RoadConfig};
use town_planner::layout::{place, LayoutSurface};
use town_planner::render::{render, Palette};
use town_planner::roads::route;

fn mix_strategy() -> impl Strategy<Value = CategoryMix> {
    // At least one class keeps a clearly positive share
    (0.05f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0).prop_map(|(r, c, i, rec)| {
        CategoryMix::new()
            .with_share(BuildingClass::Residential, r)
            .with_share(BuildingClass::Commerce, c)
            .with_share(BuildingClass::Industry, i)
            .with_share(BuildingClass::Recreation, rec)
    })
}

fn scaled(mix: &CategoryMix, factor: f64) -> CategoryMix {
    mix.iter().map(|(class, share)| (class, share * factor)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tier_counts_sum_to_class_count(
        population in 1u64..200_000,
        area in 0.01f64..500.0,
        mix in mix_strategy(),
    ) {
        let plan = plan(population, area, &mix, &AllocationConfig::default()).unwrap();
        prop_assert!(plan.total_buildings.is_finite() && plan.total_buildings >= 0.0);
        for class in &plan.classes {
            let sum: u32 = class.tiers.iter().map(|t| t.count).sum();
            prop_assert_eq!(sum, class.building_count);
            if class.building_count >= 3 {
                prop_assert!(class.tiers.iter().all(|t| t.count >= 1));
            }
        }
    }

    #[test]
    fn footprints_never_exceed_cap(
        population in 1u64..50_000,
        area in 0.01f64..100.0,
        mix in mix_strategy(),
    ) {
        let config = AllocationConfig::default();
        for d in allocate(population, area, &mix, &config).unwrap() {
            prop_assert!(d.footprint_area <= config.max_footprint_fraction * area + 1e-12);
            prop_assert!(d.footprint_area > 0.0);
        }
    }

    #[test]
    fn mix_scale_does_not_change_allocation(
        population in 1u64..100_000,
        area in 0.1f64..200.0,
        mix in mix_strategy(),
    ) {
        let config = AllocationConfig::default();
        let one = allocate(population, area, &mix.normalized().unwrap(), &config).unwrap();
        let two = allocate(population, area, &scaled(&mix.normalized().unwrap(), 2.0), &config).unwrap();
        prop_assert_eq!(one.len(), two.len());
        for (a, b) in one.iter().zip(&two) {
            prop_assert_eq!(a.class, b.class);
            prop_assert_eq!(a.tier, b.tier);
            prop_assert!((a.footprint_area - b.footprint_area).abs() <= 1e-9 * a.footprint_area.max(1.0));
            prop_assert!((a.capacity - b.capacity).abs() <= 1e-9 * a.capacity.max(1.0));
        }
    }

    #[test]
    fn placement_is_in_bounds_and_spaced(
        population in 100u64..20_000,
        area in 0.5f64..30.0,
        seed in any::<u64>(),
    ) {
        let layout_config = LayoutConfig::default();
        let descriptors = allocate(population, area, &CategoryMix::standard(), &AllocationConfig::default()).unwrap();
        let surface = LayoutSurface::for_area(area, &layout_config);
        let layout = place(&descriptors, surface, &layout_config, &mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(layout.placed.len() + layout.dropped.len(), descriptors.len());
        let margin = layout_config.spacing_margin;
        for (i, a) in layout.placed.iter().enumerate() {
            prop_assert!(a.bounds.fits_within(surface.width, surface.height));
            let grown = a.bounds.expand(margin);
            for b in &layout.placed[i + 1..] {
                prop_assert!(!grown.intersects(&b.bounds.expand(margin)));
            }
        }
    }

    #[test]
    fn routing_and_rendering_are_repeatable(
        population in 100u64..5_000,
        area in 0.5f64..10.0,
        seed in any::<u64>(),
    ) {
        let layout_config = LayoutConfig::default();
        let descriptors = allocate(population, area, &CategoryMix::standard(), &AllocationConfig::default()).unwrap();
        let surface = LayoutSurface::for_area(area, &layout_config);
        let layout = place(&descriptors, surface, &layout_config, &mut ChaCha8Rng::seed_from_u64(seed));

        let roads = route(&layout.placed, &RoadConfig::default());
        prop_assert_eq!(&roads, &route(&layout.placed, &RoadConfig::default()));
        if layout.placed.len() >= 2 {
            prop_assert_eq!(roads.len(), layout.placed.len());
        }

        let palette = Palette::default();
        let a = render(surface.width, surface.height, &layout.placed, &roads, &palette);
        let b = render(surface.width, surface.height, &layout.placed, &roads, &palette);
        prop_assert_eq!(a.as_raw(), b.as_raw());
    }
}
