// Rust guideline compliant 2026-02-23

//! Reference data for pricing and validation.
//!
//! Fixed lookup tables: base price per GB and speed breakpoints per
//! generation, valid speed ranges, brand reputation, condition and capacity
//! multipliers, and market adjustments. Everything here is a `const`; there
//! is no initialization and no mutable state.

use domain::{Condition, Generation};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Generation profiles
// ---------------------------------------------------------------------------

/// One entry of a generation's sparse speed table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBreakpoint {
    pub speed_mhz: u32,
    pub multiplier: f64,
}

/// Pricing and validation data for one generation.
#[derive(Debug)]
pub struct GenerationProfile {
    pub generation: Generation,
    /// Base price in USD per GB, before any multiplier.
    pub base_price_per_gb: f64,
    /// Lowest accepted speed, inclusive.
    pub min_speed_mhz: u32,
    /// Highest accepted speed, inclusive.
    pub max_speed_mhz: u32,
    /// Breakpoints sorted by ascending speed.
    pub speed_breakpoints: &'static [SpeedBreakpoint],
}

const fn bp(speed_mhz: u32, multiplier: f64) -> SpeedBreakpoint {
    SpeedBreakpoint { speed_mhz, multiplier }
}

const DDR3: GenerationProfile = GenerationProfile {
    generation: Generation::Gen3,
    base_price_per_gb: 8.00,
    min_speed_mhz: 800,
    max_speed_mhz: 2133,
    speed_breakpoints: &[
        bp(800, 0.7),
        bp(1066, 0.8),
        bp(1333, 0.9),
        bp(1600, 1.0),
        bp(1866, 1.1),
        bp(2133, 1.2),
    ],
};

const DDR4: GenerationProfile = GenerationProfile {
    generation: Generation::Gen4,
    base_price_per_gb: 12.00,
    min_speed_mhz: 1600,
    max_speed_mhz: 3200,
    speed_breakpoints: &[
        bp(1600, 0.7),
        bp(2133, 0.8),
        bp(2400, 0.9),
        bp(2666, 1.0),
        bp(2933, 1.1),
        bp(3200, 1.2),
    ],
};

const DDR5: GenerationProfile = GenerationProfile {
    generation: Generation::Gen5,
    base_price_per_gb: 18.00,
    min_speed_mhz: 3200,
    max_speed_mhz: 6400,
    speed_breakpoints: &[
        bp(3200, 0.8),
        bp(4800, 0.9),
        bp(5600, 1.0),
        bp(6000, 1.1),
        bp(6400, 1.2),
    ],
};

/// Reference data for `generation`.
#[must_use]
pub fn profile(generation: Generation) -> &'static GenerationProfile {
    match generation {
        Generation::Gen3 => &DDR3,
        Generation::Gen4 => &DDR4,
        Generation::Gen5 => &DDR5,
    }
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

/// Known brands and their reputation multipliers, in display order.
pub const BRANDS: &[(&str, f64)] = &[
    ("Corsair", 1.15),
    ("G.Skill", 1.12),
    ("Kingston", 1.05),
    ("Crucial", 1.08),
    ("Samsung", 1.20),
    ("SK Hynix", 1.10),
    ("Micron", 1.08),
    ("ADATA", 0.95),
    ("Team", 0.90),
    ("Patriot", 0.92),
    ("HyperX", 1.10),
    ("Mushkin", 0.95),
    ("GeIL", 0.88),
];

/// Known brand names in display order.
pub fn known_brands() -> impl Iterator<Item = &'static str> {
    BRANDS.iter().map(|(name, _)| *name)
}

/// Exact, case-sensitive membership test.
#[must_use]
pub fn is_known_brand(brand: &str) -> bool {
    known_brands().any(|name| name == brand)
}

/// Reputation multiplier for `brand`; unlisted brands are neutral (1.0).
#[must_use]
pub fn brand_multiplier(brand: &str) -> f64 {
    BRANDS
        .iter()
        .find(|(name, _)| *name == brand)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

// ---------------------------------------------------------------------------
// Condition, capacity, quantity
// ---------------------------------------------------------------------------

#[must_use]
pub fn condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::New => 1.0,
        Condition::Excellent => 0.85,
        Condition::Good => 0.70,
        Condition::Fair => 0.50,
    }
}

/// Module capacities (GB) accepted by the validator.
pub const VALID_CAPACITIES_GB: [u32; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Demand-driven premium or discount per module capacity.
const CAPACITY_MULTIPLIERS: &[(u32, f64)] = &[
    (1, 0.8),
    (2, 0.9),
    (4, 1.0),
    (8, 1.05),
    (16, 1.1),
    (32, 1.15),
    (64, 1.2),
    (128, 1.25),
];

/// Capacity multiplier; unlisted capacities are neutral (1.0).
#[must_use]
pub fn capacity_multiplier(capacity_gb: u32) -> f64 {
    CAPACITY_MULTIPLIERS
        .iter()
        .find(|(gb, _)| *gb == capacity_gb)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

/// Largest number of modules accepted in one specification.
pub const MAX_QUANTITY: u32 = 100;

// ---------------------------------------------------------------------------
// Market adjustments
// ---------------------------------------------------------------------------

/// Market-wide factors applied to every module price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAdjustments {
    pub demand_multiplier: f64,
    pub supply_multiplier: f64,
    pub seasonal_multiplier: f64,
}

impl MarketAdjustments {
    /// Adjustments in force for this build.
    pub const CURRENT: Self = Self {
        demand_multiplier: 1.25,
        supply_multiplier: 0.95,
        seasonal_multiplier: 1.05,
    };

    /// Compound factor: the product of all three multipliers.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.demand_multiplier * self.supply_multiplier * self.seasonal_multiplier
    }
}
