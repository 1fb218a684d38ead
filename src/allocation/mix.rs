//! Category mix: the fractional share of each building class

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::allocation::BuildingClass;
use crate::core::error::{Result, TownError};

/// Allowed drift of normalized shares from a total of 1.0
pub const MIX_TOLERANCE: f64 = 1e-3;

/// Share of each building class in the town
///
/// Shares need not sum to 1.0 on input; [`CategoryMix::normalized`] divides
/// them by their sum before allocation. Iteration follows class order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMix {
    shares: BTreeMap<BuildingClass, f64>,
}

impl CategoryMix {
    /// An empty mix, to be filled with [`CategoryMix::with_share`]
    pub fn new() -> Self {
        Self {
            shares: BTreeMap::new(),
        }
    }

    /// The split used when a caller supplies no mix
    pub fn standard() -> Self {
        Self::new()
            .with_share(BuildingClass::Residential, 0.3)
            .with_share(BuildingClass::Commerce, 0.2)
            .with_share(BuildingClass::Industry, 0.3)
            .with_share(BuildingClass::Recreation, 0.2)
    }

    pub fn with_share(mut self, class: BuildingClass, share: f64) -> Self {
        self.set(class, share);
        self
    }

    pub fn set(&mut self, class: BuildingClass, share: f64) {
        self.shares.insert(class, share);
    }

    /// Share of `class`, zero when the class is absent
    pub fn share(&self, class: BuildingClass) -> f64 {
        self.shares.get(&class).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuildingClass, f64)> + '_ {
        self.shares.iter().map(|(class, share)| (*class, *share))
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.shares.values().sum()
    }

    /// Parse `"residential=0.5, commerce=20%, ..."`.
    ///
    /// Values ending in `%`, and bare values above 1.0, are percentages.
    /// Repeated classes keep the last value. Shares are not normalized here.
    pub fn parse(text: &str) -> Result<Self> {
        let mut mix = Self::new();
        for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry.split_once('=').ok_or_else(|| {
                TownError::InvalidInput(format!("mix entry '{}' is not of the form class=share", entry))
            })?;
            let class: BuildingClass = name.parse()?;
            mix.set(class, parse_share(value)?);
        }
        if mix.is_empty() {
            return Err(TownError::InvalidInput("category mix is empty".into()));
        }
        Ok(mix)
    }

    /// Return a copy whose shares sum to 1.0.
    ///
    /// Fails on an empty mix, a negative or non-finite share, or a
    /// non-positive total.
    pub fn normalized(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(TownError::InvalidInput("category mix is empty".into()));
        }
        for (class, share) in self.iter() {
            if !share.is_finite() || share < 0.0 {
                return Err(TownError::InvalidInput(format!(
                    "share for {} must be a non-negative number, got {}",
                    class, share
                )));
            }
        }
        let total = self.total();
        if !(total > 0.0) || !total.is_finite() {
            return Err(TownError::InvalidInput(format!(
                "category shares must have a positive sum, got {}",
                total
            )));
        }

        let shares = self
            .shares
            .iter()
            .map(|(class, share)| (*class, share / total))
            .collect();
        Ok(Self { shares })
    }

    /// True when shares already sum to 1.0 within [`MIX_TOLERANCE`]
    pub fn is_normalized(&self) -> bool {
        (self.total() - 1.0).abs() <= MIX_TOLERANCE
    }
}

impl Default for CategoryMix {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for CategoryMix {
    type Err = TownError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromIterator<(BuildingClass, f64)> for CategoryMix {
    fn from_iter<I: IntoIterator<Item = (BuildingClass, f64)>>(iter: I) -> Self {
        Self {
            shares: iter.into_iter().collect(),
        }
    }
}

fn parse_share(value: &str) -> Result<f64> {
    let value = value.trim();
    let (number, explicit_percent) = match value.strip_suffix('%') {
        Some(pct) => (pct.trim(), true),
        None => (value, false),
    };
    let share = number
        .parse::<f64>()
        .map_err(|_| TownError::InvalidInput(format!("share '{}' is not a number", value)))?;
    if explicit_percent {
        return Ok(share / 100.0);
    }
    // Bare values above 1 are percentages written without the sign
    if share > 1.0 {
        tracing::info!(value = share, "share above 1.0, converting from percent");
        return Ok(share / 100.0);
    }
    Ok(share)
}
