//! Text (terminal) reporter with colors and formatting

use super::{format_currency, intensity_verdict};
use crate::models::{CertLevel, DashboardReport, Material};
use anyhow::Result;

/// Tier colors (ANSI escape codes)
fn tier_color(level: CertLevel) -> &'static str {
    match level {
        CertLevel::Platinum => "\x1b[97m", // Bright white
        CertLevel::Gold => "\x1b[33m",     // Yellow
        CertLevel::Silver => "\x1b[37m",   // Gray
        CertLevel::Certified => "\x1b[32m", // Green
        CertLevel::NoCertification => "\x1b[90m",
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of the net-zero gauge bar in cells
const GAUGE_WIDTH: usize = 30;

/// Render the dashboard as formatted terminal output
pub fn render(report: &DashboardReport) -> Result<String> {
    let mut out = String::new();
    let credits = &report.credits;
    let carbon = &report.carbon;

    // Header
    let tier_c = tier_color(credits.cert_level);
    out.push_str(&format!("\n{BOLD}GreenBuild Ledger{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Points: {BOLD}{}/6{RESET}  Tier: {tier_c}{BOLD}{}{RESET}  Materials: {}  Spend: {}\n\n",
        credits.total_points,
        credits.cert_level,
        report.material_count,
        format_currency(credits.total_cost, &report.currency)
    ));

    // Credits
    out.push_str(&format!("{BOLD}CREDITS{RESET}\n"));
    out.push_str(&format!(
        "  EPD documentation   {:>6} items   {}\n",
        credits.epd_count,
        format_points(credits.epd_points)
    ));
    out.push_str(&format!(
        "  Regional sourcing   {:>6.1}%        {}\n",
        credits.local_percentage,
        format_points(credits.local_points)
    ));
    out.push_str(&format!(
        "  Recycled content    {:>6.1}%        {}\n\n",
        credits.recycled_percentage,
        format_points(credits.recycled_points)
    ));

    // Carbon
    let verdict_c = if carbon.is_below_national_avg {
        "\x1b[32m"
    } else {
        "\x1b[31m"
    };
    out.push_str(&format!("{BOLD}CARBON{RESET}\n"));
    out.push_str(&format!(
        "  Total: {:.2} kg CO2e  Intensity: {:.2}  {verdict_c}{}{RESET}\n",
        carbon.total_embodied_carbon,
        carbon.carbon_intensity,
        intensity_verdict(report)
    ));

    let gauge = &report.gauge;
    out.push_str(&format!(
        "  Net zero {} {:.1}% of {:.0}",
        gauge_bar(gauge.fill_percentage),
        gauge.fill_percentage,
        gauge.target
    ));
    if gauge.exceeded {
        out.push_str(&format!("  \x1b[31mbudget exceeded{RESET}\n\n"));
    } else {
        out.push_str(&format!("  {DIM}{:.0} remaining{RESET}\n\n", gauge.remaining));
    }

    // Category breakdown
    if !report.categories.is_empty() {
        out.push_str(&format!("{BOLD}BY CATEGORY{RESET}\n"));
        for bucket in &report.categories {
            out.push_str(&format!(
                "  {:<16} {:>12.2} kg\n",
                bucket.category, bucket.value
            ));
        }
        out.push('\n');
    }

    if report.material_count == 0 {
        out.push_str(&format!(
            "{DIM}No materials yet. Run `greenbuild add` to start the ledger.{RESET}\n"
        ));
    }

    Ok(out)
}

/// Render the material list shown by `greenbuild list`
pub fn render_ledger(materials: &[Material], currency: &str) -> String {
    if materials.is_empty() {
        return format!("{DIM}Ledger is empty.{RESET}\n");
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{DIM}  ID        NAME                          CATEGORY      COST            CO2e       RECYCLED  LOCAL  EPD{RESET}\n"
    ));
    out.push_str(&format!(
        "{DIM}  ──────────────────────────────────────────────────────────────────────────────────────────────{RESET}\n"
    ));

    for m in materials {
        // chars() keeps multi-byte names intact
        let short_id: String = m.id.chars().take(8).collect();
        let name: String = if m.name.chars().count() > 28 {
            format!("{}...", m.name.chars().take(25).collect::<String>())
        } else {
            m.name.clone()
        };
        out.push_str(&format!(
            "  {:<8}  {:<28}  {:<12}  {:<14}  {:>9.2}  {:>7.1}%  {:<5}  {}\n",
            short_id,
            name,
            m.category_label(),
            format_currency(m.cost, currency),
            crate::scoring::material_carbon(m),
            m.weighted_recycled_percent(),
            yes_no(m.is_locally_sourced),
            yes_no(m.has_epd),
        ));
    }

    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn format_points(points: u8) -> String {
    let color = match points {
        2 => "\x1b[32m",
        1 => "\x1b[33m",
        _ => "\x1b[90m",
    };
    format!("{color}+{} pts{RESET}", points)
}

fn gauge_bar(fill_percentage: f64) -> String {
    let filled = ((fill_percentage / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    let filled = filled.min(GAUGE_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    )
}
