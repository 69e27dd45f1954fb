//! Field-name translation between storage and the in-memory model
//!
//! Storage uses snake_case column names; [`Material`] serializes with
//! camelCase names. [`FIELD_MAP`] is the single table both directions read.
//! Columns missing from the table (such as `created_at`) never reach the
//! model, and model fields missing from it are never stored.

use super::{StoreError, StoreResult, WireRecord};
use crate::models::Material;
use serde_json::Value;
use tracing::trace;

/// (wire name, model name)
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("id", "id"),
    ("name", "name"),
    ("category", "category"),
    ("cost", "cost"),
    ("weight", "weight"),
    ("embodied_carbon", "embodiedCarbon"),
    ("transport_distance", "transportDistance"),
    ("recycled_content_pre", "recycledContentPre"),
    ("recycled_content_post", "recycledContentPost"),
    ("is_locally_sourced", "isLocallySourced"),
    ("has_epd", "hasEPD"),
    ("supplier", "supplier"),
];

/// Storage name for a model field
pub fn wire_name(model_name: &str) -> Option<&'static str> {
    FIELD_MAP
        .iter()
        .find(|(_, model)| *model == model_name)
        .map(|(wire, _)| *wire)
}

/// Model field for a storage name
pub fn model_name(wire_name: &str) -> Option<&'static str> {
    FIELD_MAP
        .iter()
        .find(|(wire, _)| *wire == wire_name)
        .map(|(_, model)| *model)
}

/// Translate a material into a wire record
pub fn to_wire(material: &Material) -> StoreResult<WireRecord> {
    let Value::Object(fields) = serde_json::to_value(material)? else {
        return Err(StoreError::Malformed {
            key: material.id.clone(),
            reason: "material did not serialize to an object".to_string(),
        });
    };

    let mut record = WireRecord::new();
    for (field, value) in fields {
        match wire_name(&field) {
            Some(wire) => {
                record.insert(wire.to_string(), value);
            }
            None => trace!("Field '{}' has no storage column, not stored", field),
        }
    }
    Ok(record)
}

/// Translate a wire record back into a material
pub fn from_wire(record: &WireRecord) -> StoreResult<Material> {
    let mut fields = serde_json::Map::new();
    for (column, value) in record {
        if let Some(field) = model_name(column) {
            fields.insert(field.to_string(), value.clone());
        }
    }
    serde_json::from_value(Value::Object(fields)).map_err(|e| StoreError::Malformed {
        key: record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("<unknown>")
            .to_string(),
        reason: e.to_string(),
    })
}
