//! Audit CSV export
//!
//! One row per material in ledger order. Fields containing commas, quotes
//! or newlines are quoted by the writer.

use crate::models::Material;
use chrono::NaiveDate;
use std::io::Write;
use thiserror::Error;

/// Fixed column order of the audit file
pub const HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Category",
    "Cost",
    "Weight",
    "Embodied Carbon",
    "Transport Distance",
    "Local Sourced",
    "Has EPD",
    "Supplier Name",
    "Supplier Location",
];

/// Fallbacks for blank supplier fields
const MISSING_SUPPLIER_NAME: &str = "N/A";
const MISSING_SUPPLIER_LOCATION: &str = "UAE";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data available to export.")]
    Empty,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the audit CSV for `materials` into `writer`.
///
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(materials: &[Material], writer: W) -> Result<usize, ExportError> {
    if materials.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for m in materials {
        csv_writer.write_record(row(m))?;
    }

    csv_writer.flush()?;
    Ok(materials.len())
}

/// Render the audit CSV to a string
pub fn render_csv(materials: &[Material]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(materials, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// `GreenBuild_Audit_YYYY-MM-DD.csv`
pub fn default_export_filename(date: NaiveDate) -> String {
    format!("GreenBuild_Audit_{}.csv", date.format("%Y-%m-%d"))
}

fn row(m: &Material) -> [String; 11] {
    [
        m.id.clone(),
        m.name.clone(),
        m.category_label().to_string(),
        m.cost.to_string(),
        m.weight.to_string(),
        m.embodied_carbon.to_string(),
        m.transport_distance.to_string(),
        yes_no(m.is_locally_sourced).to_string(),
        yes_no(m.has_epd).to_string(),
        or_fallback(&m.supplier.name, MISSING_SUPPLIER_NAME),
        or_fallback(&m.supplier.location, MISSING_SUPPLIER_LOCATION),
    ]
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
