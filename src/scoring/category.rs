//! Carbon breakdown by material category

use super::{material_carbon, round2};
use crate::models::Material;
use serde::Serialize;

/// Carbon total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCarbon {
    pub category: String,
    /// kg CO2e, rounded to 2 decimals
    pub value: f64,
}

/// Sum carbon per category present, in first-encounter order.
///
/// Categories with no materials get no entry. Unknown labels get their own
/// bucket; materials without a category land in `Uncategorized`.
pub fn aggregate_by_category(materials: &[Material]) -> Vec<CategoryCarbon> {
    let mut buckets: Vec<(&str, f64)> = Vec::new();

    for m in materials {
        let label = m.category_label();
        let carbon = material_carbon(m);
        match buckets.iter_mut().find(|(name, _)| *name == label) {
            Some((_, total)) => *total += carbon,
            None => buckets.push((label, carbon)),
        }
    }

    buckets
        .into_iter()
        .map(|(category, total)| CategoryCarbon {
            category: category.to_string(),
            value: round2(total),
        })
        .collect()
}
