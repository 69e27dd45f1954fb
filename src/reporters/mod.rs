//! Output reporters for the GreenBuild dashboard
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown
//!
//! The audit CSV lives in [`audit`] since it renders the raw ledger rather
//! than the computed dashboard.

pub mod audit;
mod json;
mod markdown;
mod text;

pub use audit::{default_export_filename, render_csv, write_csv, ExportError};
pub use json::render_materials;
pub use text::render_ledger;

use crate::models::DashboardReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a dashboard report in the specified format
pub fn report(report: &DashboardReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render a dashboard report using an OutputFormat enum
pub fn report_with_format(report: &DashboardReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
    }
}

/// Whole-unit currency with thousands separators, e.g. `AED 12,345`
pub fn format_currency(amount: f64, currency: &str) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{} {}{}", currency, sign, grouped)
}

/// Verdict shown next to the carbon intensity
pub fn intensity_verdict(report: &DashboardReport) -> &'static str {
    if report.carbon.is_below_national_avg {
        "Leading National Avg"
    } else {
        "High Intensity"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Category, Material, Supplier};
    use crate::scoring::CarbonConfig;

    /// Two materials: one fully qualifying steel beam and one plain finish
    pub(crate) fn test_materials() -> Vec<Material> {
        vec![
            Material {
                id: "m1".into(),
                name: "Recycled Steel Beam".into(),
                category: Some(Category::Structural),
                cost: 10_000.0,
                weight: 100.0,
                embodied_carbon: 2.0,
                transport_distance: 500.0,
                recycled_content_pre: 0.0,
                recycled_content_post: 50.0,
                is_locally_sourced: true,
                has_epd: true,
                supplier: Supplier {
                    name: "Emirates Steel".into(),
                    location: "Abu Dhabi".into(),
                    icv_score: 0.0,
                },
            },
            Material {
                id: "m2".into(),
                name: "Ceramic Tile".into(),
                category: Some(Category::Finishes),
                cost: 2_345.0,
                weight: 10.0,
                embodied_carbon: 1.0,
                transport_distance: 0.0,
                ..Default::default()
            },
        ]
    }

    pub(crate) fn test_report() -> DashboardReport {
        DashboardReport::build(&test_materials(), &CarbonConfig::default(), "AED")
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12_345.0, "AED"), "AED 12,345");
        assert_eq!(format_currency(0.0, "AED"), "AED 0");
        assert_eq!(format_currency(999.6, "AED"), "AED 1,000");
        assert_eq!(format_currency(1_234_567.0, "USD"), "USD 1,234,567");
        assert_eq!(format_currency(-4_500.0, "AED"), "AED -4,500");
    }

    #[test]
    fn test_intensity_verdict() {
        let report = test_report();
        assert_eq!(intensity_verdict(&report), "Leading National Avg");

        let strict = CarbonConfig {
            national_average: 1.0,
            ..Default::default()
        };
        let report = DashboardReport::build(&test_materials(), &strict, "AED");
        assert_eq!(intensity_verdict(&report), "High Intensity");
    }

    #[test]
    fn test_report_dispatch() {
        let report = test_report();
        assert!(super::report(&report, "json").unwrap().starts_with('{'));
        assert!(super::report(&report, "markdown").unwrap().starts_with('#'));
        assert!(super::report(&report, "html").is_err());
    }
}
