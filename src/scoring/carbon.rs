//! Embodied-carbon estimator
//!
//! Production carbon (mass × intensity) plus transport carbon at a fixed
//! factor per tonne-kilometer.

use super::round2;
use crate::models::Material;
use serde::{Deserialize, Serialize};

/// kg CO2e per tonne-kilometer of transport
pub const TRANSPORT_FACTOR: f64 = 0.1;

/// Per-item intensity (kg CO2e) below which a project leads the national average
pub const DEFAULT_NATIONAL_AVERAGE: f64 = 500.0;

/// Project-wide net-zero budget (kg CO2e)
pub const DEFAULT_NET_ZERO_TARGET: f64 = 50_000.0;

/// Reference thresholds used by the estimator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CarbonConfig {
    /// Intensity threshold for the national-average comparison (default: 500)
    #[serde(default = "default_national_average")]
    pub national_average: f64,

    /// Net-zero gauge target (default: 50000)
    #[serde(default = "default_net_zero_target")]
    pub net_zero_target: f64,
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            national_average: default_national_average(),
            net_zero_target: default_net_zero_target(),
        }
    }
}

fn default_national_average() -> f64 {
    DEFAULT_NATIONAL_AVERAGE
}

fn default_net_zero_target() -> f64 {
    DEFAULT_NET_ZERO_TARGET
}

/// Carbon totals for a material collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEstimate {
    /// kg CO2e, rounded to 2 decimals
    pub total_embodied_carbon: f64,
    /// Total divided by item count, rounded to 2 decimals
    pub carbon_intensity: f64,
    pub is_below_national_avg: bool,
}

/// Carbon attributed to a single material (unrounded)
pub fn material_carbon(material: &Material) -> f64 {
    let production = material.weight * material.embodied_carbon;
    let transport = material.weight / 1000.0 * material.transport_distance * TRANSPORT_FACTOR;
    production + transport
}

/// Estimate carbon with the default thresholds
pub fn estimate_carbon(materials: &[Material]) -> CarbonEstimate {
    estimate_carbon_with(materials, &CarbonConfig::default())
}

pub fn estimate_carbon_with(materials: &[Material], config: &CarbonConfig) -> CarbonEstimate {
    let total: f64 = materials.iter().map(material_carbon).sum();
    let intensity = if materials.is_empty() {
        0.0
    } else {
        total / materials.len() as f64
    };
    let carbon_intensity = round2(intensity);

    CarbonEstimate {
        total_embodied_carbon: round2(total),
        carbon_intensity,
        is_below_national_avg: carbon_intensity < config.national_average,
    }
}

/// Progress of total carbon against the net-zero budget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetZeroGauge {
    pub total_carbon: f64,
    pub target: f64,
    /// Share of the budget used, capped at 100
    pub fill_percentage: f64,
    /// Budget left, never negative
    pub remaining: f64,
    pub exceeded: bool,
}

impl NetZeroGauge {
    pub fn new(total_carbon: f64, target: f64) -> Self {
        let fill_percentage = if target > 0.0 {
            (total_carbon / target * 100.0).min(100.0)
        } else {
            100.0
        };
        Self {
            total_carbon,
            target,
            fill_percentage,
            remaining: (target - total_carbon).max(0.0),
            exceeded: total_carbon > target,
        }
    }
}
