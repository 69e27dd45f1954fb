//! Sustainability scoring engine
//!
//! Three independent pure computations over the full material list.
//! None of them fail: inputs are already coerced to numbers at the model
//! boundary and every division is guarded.
//!
//! # Credit Scoring (LEED v4.1 style)
//!
//! ```text
//! EPD credit       epd_count >= 20 → 2, >= 10 → 1          (absolute item count)
//! Regional credit  local_cost / total_cost >= 30% → 2, >= 15% → 1
//! Recycled credit  Σ cost × (post + 0.5 × pre) / 100
//!                  ───────────────────────────────── >= 20% → 2, >= 10% → 1
//!                             total_cost
//!
//! Tier: >= 5 Platinum, >= 4 Gold, >= 3 Silver, >= 1 Certified
//! ```
//!
//! # Carbon Estimation
//!
//! ```text
//! carbon(m) = weight × embodied_carbon + weight / 1000 × distance × 0.1
//!                                        └──────── transport, per t·km ───┘
//! ```
//!
//! Totals and intensity are rounded to 2 decimals. The category breakdown
//! re-partitions the same per-material figure.

mod carbon;
mod category;
mod credits;

pub use carbon::{
    estimate_carbon, estimate_carbon_with, material_carbon, CarbonConfig, CarbonEstimate,
    NetZeroGauge, DEFAULT_NATIONAL_AVERAGE, DEFAULT_NET_ZERO_TARGET, TRANSPORT_FACTOR,
};
pub use category::{aggregate_by_category, CategoryCarbon};
pub use credits::{score_credits, CreditScore};

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(205.0), 205.0);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }
}
