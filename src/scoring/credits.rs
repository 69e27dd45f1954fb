//! LEED-style credit scorer
//!
//! Computes the documentation (EPD), regional-sourcing and recycled-content
//! credits and the resulting certification tier.

use crate::models::{CertLevel, Material};
use serde::Serialize;
use tracing::debug;

/// Points thresholds: (two-point threshold, one-point threshold)
const EPD_COUNT_THRESHOLDS: (usize, usize) = (20, 10);
const LOCAL_PERCENT_THRESHOLDS: (f64, f64) = (30.0, 15.0);
const RECYCLED_PERCENT_THRESHOLDS: (f64, f64) = (20.0, 10.0);

/// Credit breakdown for a material collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScore {
    /// Sum of cost over all materials
    pub total_cost: f64,
    /// Materials with an Environmental Product Declaration
    pub epd_count: usize,
    /// Cost share of locally sourced materials (0-100)
    pub local_percentage: f64,
    /// Cost-weighted recycled content (0-100, can exceed with bad input)
    pub recycled_percentage: f64,
    pub epd_points: u8,
    pub local_points: u8,
    pub recycled_points: u8,
    /// Sum of the three credits (0-6)
    pub total_points: u8,
    pub cert_level: CertLevel,
}

/// Score the three credits and derive the certification tier
pub fn score_credits(materials: &[Material]) -> CreditScore {
    let total_cost: f64 = materials.iter().map(|m| m.cost).sum();

    let epd_count = materials.iter().filter(|m| m.has_epd).count();
    let epd_points = if epd_count >= EPD_COUNT_THRESHOLDS.0 {
        2
    } else if epd_count >= EPD_COUNT_THRESHOLDS.1 {
        1
    } else {
        0
    };

    let local_value: f64 = materials
        .iter()
        .filter(|m| m.is_locally_sourced)
        .map(|m| m.cost)
        .sum();
    let local_percentage = share_of(local_value, total_cost);
    let local_points = percent_points(local_percentage, LOCAL_PERCENT_THRESHOLDS);

    let recycled_value: f64 = materials
        .iter()
        .map(|m| m.cost * m.weighted_recycled_percent() / 100.0)
        .sum();
    let recycled_percentage = share_of(recycled_value, total_cost);
    let recycled_points = percent_points(recycled_percentage, RECYCLED_PERCENT_THRESHOLDS);

    let total_points = epd_points + local_points + recycled_points;
    let cert_level = CertLevel::from_points(total_points);

    debug!(
        "Credits: epd={} ({} items), local={} ({:.1}%), recycled={} ({:.1}%) -> {} pts, {}",
        epd_points,
        epd_count,
        local_points,
        local_percentage,
        recycled_points,
        recycled_percentage,
        total_points,
        cert_level
    );

    CreditScore {
        total_cost,
        epd_count,
        local_percentage,
        recycled_percentage,
        epd_points,
        local_points,
        recycled_points,
        total_points,
        cert_level,
    }
}

/// Percentage of `part` in `total`, zero when there is no total
fn share_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

fn percent_points(percentage: f64, (two, one): (f64, f64)) -> u8 {
    if percentage >= two {
        2
    } else if percentage >= one {
        1
    } else {
        0
    }
}
