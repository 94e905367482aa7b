// Rust guideline compliant 2026-02-23

//! Price calculator and quote builder.
//!
//! [`calculate_price`] turns a validated [`MemorySpecification`] into a total
//! value; [`build_quote`] wraps that value into a complete [`Quote`] with a
//! price band, explanatory factors, a response timeline and next steps.
//!
//! Both functions are pure: the same specification always yields the same
//! output, and the only inputs besides the specification are the `catalog`
//! constants.

use catalog::{MarketAdjustments, brand_multiplier, capacity_multiplier, condition_multiplier, profile};
use domain::{Condition, Generation, MemorySpecification, PriceRange, Quote};

/// Relative half-width of the quoted price band.
const PRICE_VARIANCE: f64 = 0.15;

/// Steps shown with every quote, in order.
pub const NEXT_STEPS: [&str; 4] = [
    "Our team will review your RAM specifications",
    "We will verify current market conditions",
    "You will receive a formal purchase offer",
    "Upon acceptance, we will arrange pickup or shipping",
];

// ---------------------------------------------------------------------------
// Price calculator
// ---------------------------------------------------------------------------

/// Round to cents, half-up.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Multiplier of the breakpoint nearest to `speed_mhz`.
///
/// Breakpoints are scanned in ascending order and only a strictly smaller
/// distance replaces the current pick, so a tie goes to the slower breakpoint.
#[must_use]
pub fn speed_multiplier(generation: Generation, speed_mhz: u32) -> f64 {
    let breakpoints = profile(generation).speed_breakpoints;
    let mut nearest = breakpoints[0];
    for candidate in &breakpoints[1..] {
        if candidate.speed_mhz.abs_diff(speed_mhz) < nearest.speed_mhz.abs_diff(speed_mhz) {
            nearest = *candidate;
        }
    }
    nearest.multiplier
}

/// Price of one module before market adjustment and quantity.
#[must_use]
pub fn module_base_price(spec: &MemorySpecification) -> f64 {
    profile(spec.generation).base_price_per_gb
        * f64::from(spec.capacity_gb)
        * speed_multiplier(spec.generation, spec.speed_mhz)
        * brand_multiplier(&spec.brand)
        * condition_multiplier(spec.condition)
        * capacity_multiplier(spec.capacity_gb)
}

/// Estimated total value of `spec`, rounded to cents.
///
/// `spec` must come from the validator; the typed fields already guarantee
/// every table lookup succeeds.
#[must_use]
pub fn calculate_price(spec: &MemorySpecification) -> f64 {
    let adjusted = module_base_price(spec) * MarketAdjustments::CURRENT.factor();
    round_to_cents(adjusted * f64::from(spec.quantity))
}

// ---------------------------------------------------------------------------
// Quote builder
// ---------------------------------------------------------------------------

/// The ±15 % band around `estimated_value`, floored at zero.
#[must_use]
pub fn price_range(estimated_value: f64) -> PriceRange {
    PriceRange {
        min: round_to_cents((estimated_value * (1.0 - PRICE_VARIANCE)).max(0.0)),
        max: round_to_cents(estimated_value * (1.0 + PRICE_VARIANCE)),
    }
}

/// Human-readable explanation of what moved the price, in a fixed order.
///
/// Neutral multipliers (exactly 1.0) produce no entry.
#[must_use]
pub fn pricing_factors(spec: &MemorySpecification) -> Vec<String> {
    let mut factors = vec![format!("{} base pricing applied", spec.generation)];

    let speed = speed_multiplier(spec.generation, spec.speed_mhz);
    if speed > 1.0 {
        factors.push(format!("High speed ({}MHz) premium applied", spec.speed_mhz));
    } else if speed < 1.0 {
        factors.push(format!("Lower speed ({}MHz) discount applied", spec.speed_mhz));
    }

    let brand = brand_multiplier(&spec.brand);
    if brand > 1.0 {
        factors.push(format!("Premium brand ({}) bonus applied", spec.brand));
    } else if brand < 1.0 {
        factors.push(format!("Budget brand ({}) adjustment applied", spec.brand));
    }

    if spec.condition != Condition::New {
        factors.push(format!("Used condition ({}) adjustment applied", spec.condition));
    }

    let capacity = capacity_multiplier(spec.capacity_gb);
    if capacity > 1.0 {
        factors.push(format!("High capacity ({}GB) premium applied", spec.capacity_gb));
    } else if capacity < 1.0 {
        factors.push(format!("Low capacity ({}GB) discount applied", spec.capacity_gb));
    }

    factors.push("Current market demand adjustment applied".to_owned());

    if spec.quantity > 1 {
        factors.push(format!("Bulk quantity ({} modules) considered", spec.quantity));
    }
    factors
}

/// Expected response time: a step function of quantity.
#[must_use]
pub fn response_timeline(quantity: u32) -> &'static str {
    match quantity {
        0 | 1 => "Response within 2-4 hours",
        2..=5 => "Response within 4-8 hours",
        _ => "Response within 8-24 hours for bulk evaluation",
    }
}

/// Build the full quote for a validated specification.
#[must_use]
pub fn build_quote(spec: &MemorySpecification) -> Quote {
    let estimated_value = calculate_price(spec);
    let quote = Quote {
        estimated_value,
        price_range: price_range(estimated_value),
        factors: pricing_factors(spec),
        timeline: response_timeline(spec.quantity).to_owned(),
        next_steps: NEXT_STEPS.iter().map(|s| (*s).to_owned()).collect(),
    };
    tracing::debug!(
        generation = %spec.generation,
        quantity = spec.quantity,
        estimated_value,
        "pricing.quote.built"
    );
    quote
}

/// One-line summary, e.g. `Corsair DDR4-3200 16GB (excellent) x2`.
#[must_use]
pub fn describe_specification(spec: &MemorySpecification) -> String {
    format!(
        "{} {}-{} {}GB ({}) x{}",
        spec.brand, spec.generation, spec.speed_mhz, spec.capacity_gb, spec.condition, spec.quantity
    )
}
