//! Building allocation: how many buildings of each class, and how big

pub mod allocator;
pub mod class;
pub mod mix;

pub use allocator::{
    allocate, plan, split_tiers, total_buildings, AllocationPlan, BuildingDescriptor, ClassPlan,
    TierPlan, SQ_METERS_PER_SQ_KM,
};
pub use class::{BuildingClass, SizeTier, TIER_COUNT};
pub use mix::{CategoryMix, MIX_TOLERANCE};
