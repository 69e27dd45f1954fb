//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates dashboards suitable for:
//! - Project wikis
//! - Tender submissions
//! - Certification pre-assessment notes

use super::{format_currency, intensity_verdict};
use crate::models::{CertLevel, DashboardReport};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &DashboardReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_credits(report));
    md.push('\n');

    md.push_str(&render_carbon(report));
    md.push('\n');

    md.push_str(&render_categories(report));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &DashboardReport) -> String {
    let tier_emoji = match report.credits.cert_level {
        CertLevel::Platinum => "💎",
        CertLevel::Gold => "🥇",
        CertLevel::Silver => "🥈",
        CertLevel::Certified => "✅",
        CertLevel::NoCertification => "➖",
    };

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"# {} GreenBuild Sustainability Report

**Tier: {}** | **Points: {}/6** | **Spend: {}**

Generated: {}
"#,
        tier_emoji,
        report.credits.cert_level,
        report.credits.total_points,
        format_currency(report.credits.total_cost, &report.currency),
        timestamp
    )
}

fn render_credits(report: &DashboardReport) -> String {
    let c = &report.credits;

    format!(
        r#"## Credits

| Credit | Measure | Points |
|--------|---------|--------|
| EPD Documentation | {} items | {}/2 |
| Regional Sourcing | {:.1}% of spend | {}/2 |
| Recycled Content | {:.1}% of spend | {}/2 |
| **Total** | | **{}/6** |
"#,
        c.epd_count,
        c.epd_points,
        c.local_percentage,
        c.local_points,
        c.recycled_percentage,
        c.recycled_points,
        c.total_points
    )
}

fn render_carbon(report: &DashboardReport) -> String {
    let carbon = &report.carbon;
    let gauge = &report.gauge;
    let budget = if gauge.exceeded {
        "❌ Exceeded".to_string()
    } else {
        format!("{:.0} kg remaining", gauge.remaining)
    };

    format!(
        r#"## Carbon

| Metric | Value |
|--------|-------|
| Total Embodied Carbon | {:.2} kg CO2e |
| Intensity | {:.2} kg CO2e / material |
| Verdict | {} |
| Net-Zero Budget | {:.1}% of {:.0} kg |
| Budget | {} |
| Materials | {} |
"#,
        carbon.total_embodied_carbon,
        carbon.carbon_intensity,
        intensity_verdict(report),
        gauge.fill_percentage,
        gauge.target,
        budget,
        report.material_count
    )
}

fn render_categories(report: &DashboardReport) -> String {
    let mut md = String::from("## Carbon by Category\n\n");

    if report.categories.is_empty() {
        md.push_str("No materials recorded yet.\n");
        return md;
    }

    md.push_str("| Category | kg CO2e |\n|----------|---------|\n");
    for bucket in &report.categories {
        md.push_str(&format!("| {} | {:.2} |\n", bucket.category, bucket.value));
    }

    md
}

fn render_footer() -> String {
    r#"---

*Generated by GreenBuild Ledger*
"#
    .to_string()
}
