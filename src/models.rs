//! Core data models for GreenBuild
//!
//! `Material` is the only persisted entity. Everything else here is either
//! the data-entry path that produces one (`MaterialDraft`) or a derived value
//! (certification tier, sync status, dashboard report).
//!
//! All numeric fields are coerced leniently: a missing, `null`, non-numeric
//! or non-finite value becomes `0.0` instead of failing deserialization.

use crate::scoring::{
    aggregate_by_category, estimate_carbon_with, score_credits, CarbonConfig, CarbonEstimate,
    CategoryCarbon, CreditScore, NetZeroGauge,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Label used for materials whose category is missing or blank
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Coerce free-form text to a number, defaulting to zero.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn number_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => coerce_number(s),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Category::from_label(&s),
        _ => None,
    })
}

fn lenient_supplier<'de, D>(deserializer: D) -> Result<Supplier, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).unwrap_or_default(),
        _ => Supplier::default(),
    })
}

/// Material category
///
/// Labels outside the four known categories are kept verbatim in `Other`
/// so stored records keep the category they were written with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Structural,
    Enclosure,
    Mechanical,
    Finishes,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Structural => "structural",
            Category::Enclosure => "enclosure",
            Category::Mechanical => "mechanical",
            Category::Finishes => "finishes",
            Category::Other(label) => label,
        }
    }

    /// Read a stored label. Blank labels have no category; unknown ones are
    /// kept as `Other`.
    pub fn from_label(raw: &str) -> Option<Category> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(known(trimmed).unwrap_or_else(|| Category::Other(trimmed.to_string())))
    }
}

fn known(label: &str) -> Option<Category> {
    match label.to_lowercase().as_str() {
        "structural" => Some(Category::Structural),
        "enclosure" => Some(Category::Enclosure),
        "mechanical" => Some(Category::Mechanical),
        "finishes" => Some(Category::Finishes),
        _ => None,
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for user input: only the four known categories are accepted.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        known(s.trim()).ok_or_else(|| {
            format!(
                "Unknown category '{}'. Valid categories: structural, enclosure, mechanical, finishes",
                s.trim().to_lowercase()
            )
        })
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Category::from_label(&raw).ok_or_else(|| serde::de::Error::custom("empty category"))
    }
}

/// Supplier of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    /// In-country value score. Carried through storage, never scored.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub icv_score: f64,
}

/// A construction material tracked in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Option<Category>,
    /// Currency amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,
    /// Mass in kg
    #[serde(default, deserialize_with = "lenient_f64")]
    pub weight: f64,
    /// kg CO2e per kg of material
    #[serde(default, deserialize_with = "lenient_f64")]
    pub embodied_carbon: f64,
    /// km from supplier to site
    #[serde(default, deserialize_with = "lenient_f64")]
    pub transport_distance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recycled_content_pre: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub recycled_content_post: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_locally_sourced: bool,
    #[serde(default, rename = "hasEPD", deserialize_with = "lenient_bool")]
    pub has_epd: bool,
    #[serde(default, deserialize_with = "lenient_supplier")]
    pub supplier: Supplier,
}

impl Material {
    /// Post-consumer content at full weight plus pre-consumer at half weight, in percent
    pub fn weighted_recycled_percent(&self) -> f64 {
        self.recycled_content_post + 0.5 * self.recycled_content_pre
    }

    /// Category name, or `Uncategorized` when absent
    pub fn category_label(&self) -> &str {
        self.category.as_ref().map_or(UNCATEGORIZED, Category::as_str)
    }
}

/// Raw data-entry submission for a new material.
///
/// Numeric fields hold the text as typed; they are coerced on submission.
#[derive(Debug, Clone, Default)]
pub struct MaterialDraft {
    pub name: String,
    pub category: Option<Category>,
    pub cost: String,
    pub weight: String,
    pub embodied_carbon: String,
    pub transport_distance: String,
    pub recycled_content_pre: String,
    pub recycled_content_post: String,
    pub is_locally_sourced: bool,
    pub has_epd: bool,
    pub supplier_name: String,
    pub supplier_location: String,
}

impl MaterialDraft {
    /// Build the material, generating a fresh identifier
    pub fn into_material(self) -> Material {
        let id = uuid::Uuid::new_v4().to_string();
        self.into_material_with_id(id)
    }

    pub fn into_material_with_id(self, id: String) -> Material {
        Material {
            id,
            name: non_empty_or(self.name, "Unnamed Material"),
            category: Some(self.category.unwrap_or_default()),
            cost: coerce_number(&self.cost),
            weight: coerce_number(&self.weight),
            embodied_carbon: coerce_number(&self.embodied_carbon),
            transport_distance: coerce_number(&self.transport_distance),
            recycled_content_pre: coerce_number(&self.recycled_content_pre),
            recycled_content_post: coerce_number(&self.recycled_content_post),
            is_locally_sourced: self.is_locally_sourced,
            has_epd: self.has_epd,
            supplier: Supplier {
                name: non_empty_or(self.supplier_name, "Direct"),
                location: non_empty_or(self.supplier_location, "UAE"),
                icv_score: 0.0,
            },
        }
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Certification tier derived from total credit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CertLevel {
    #[serde(rename = "No Certification")]
    NoCertification,
    Certified,
    Silver,
    Gold,
    Platinum,
}

impl CertLevel {
    /// Highest tier whose threshold the points reach
    pub fn from_points(points: u8) -> Self {
        match points {
            p if p >= 5 => CertLevel::Platinum,
            p if p >= 4 => CertLevel::Gold,
            p if p >= 3 => CertLevel::Silver,
            p if p >= 1 => CertLevel::Certified,
            _ => CertLevel::NoCertification,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CertLevel::NoCertification => "No Certification",
            CertLevel::Certified => "Certified",
            CertLevel::Silver => "Silver",
            CertLevel::Gold => "Gold",
            CertLevel::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for CertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the last write to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Synced,
    Syncing,
    Error,
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "Cloud Synced",
            SyncStatus::Syncing => "Syncing...",
            SyncStatus::Error => "Sync Error",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Synced => write!(f, "synced"),
            SyncStatus::Syncing => write!(f, "syncing"),
            SyncStatus::Error => write!(f, "error"),
        }
    }
}

/// Everything the dashboard shows, computed in one pass over the ledger
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub credits: CreditScore,
    pub carbon: CarbonEstimate,
    pub gauge: NetZeroGauge,
    pub categories: Vec<CategoryCarbon>,
    pub material_count: usize,
    pub currency: String,
}

impl DashboardReport {
    pub fn build(materials: &[Material], carbon_config: &CarbonConfig, currency: &str) -> Self {
        let carbon = estimate_carbon_with(materials, carbon_config);
        let gauge = NetZeroGauge::new(carbon.total_embodied_carbon, carbon_config.net_zero_target);
        Self {
            credits: score_credits(materials),
            carbon,
            gauge,
            categories: aggregate_by_category(materials),
            material_count: materials.len(),
            currency: currency.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("12.5"), 12.5);
        assert_eq!(coerce_number("  40 "), 40.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
        // Negative values are accepted input
        assert_eq!(coerce_number("-3"), -3.0);
    }

    #[test]
    fn test_lenient_material_deserialization() {
        let json = r#"{
            "id": "m1",
            "name": null,
            "category": "roofing",
            "cost": "1500",
            "weight": "heavy",
            "embodiedCarbon": 2.5,
            "isLocallySourced": "yes",
            "hasEPD": 1,
            "supplier": null
        }"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, "m1");
        assert_eq!(m.name, "");
        assert_eq!(m.category, Some(Category::Other("roofing".into())));
        assert_eq!(m.category_label(), "roofing");
        assert_eq!(m.cost, 1500.0);
        assert_eq!(m.weight, 0.0);
        assert_eq!(m.embodied_carbon, 2.5);
        assert_eq!(m.transport_distance, 0.0);
        assert!(m.is_locally_sourced);
        assert!(m.has_epd);
        assert_eq!(m.supplier, Supplier::default());
    }

    #[test]
    fn test_material_serializes_camel_case() {
        let m = Material {
            id: "x".into(),
            has_epd: true,
            ..Default::default()
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["hasEPD"], true);
        assert!(v.get("embodiedCarbon").is_some());
        assert!(v.get("recycledContentPost").is_some());
        assert!(v["supplier"].get("icvScore").is_some());
    }

    #[test]
    fn test_draft_defaults() {
        let draft = MaterialDraft {
            cost: "abc".into(),
            weight: "250".into(),
            ..Default::default()
        };
        let m = draft.into_material();
        assert_eq!(m.name, "Unnamed Material");
        assert_eq!(m.category, Some(Category::Structural));
        assert_eq!(m.cost, 0.0);
        assert_eq!(m.weight, 250.0);
        assert_eq!(m.supplier.name, "Direct");
        assert_eq!(m.supplier.location, "UAE");
        assert!(uuid::Uuid::parse_str(&m.id).is_ok());
    }

    #[test]
    fn test_weighted_recycled_percent() {
        let m = Material {
            recycled_content_pre: 40.0,
            recycled_content_post: 25.0,
            ..Default::default()
        };
        assert_eq!(m.weighted_recycled_percent(), 45.0);
    }

    #[test]
    fn test_cert_level_thresholds() {
        assert_eq!(CertLevel::from_points(0), CertLevel::NoCertification);
        assert_eq!(CertLevel::from_points(1), CertLevel::Certified);
        assert_eq!(CertLevel::from_points(2), CertLevel::Certified);
        assert_eq!(CertLevel::from_points(3), CertLevel::Silver);
        assert_eq!(CertLevel::from_points(4), CertLevel::Gold);
        assert_eq!(CertLevel::from_points(5), CertLevel::Platinum);
        assert_eq!(CertLevel::from_points(6), CertLevel::Platinum);
        assert_eq!(
            serde_json::to_string(&CertLevel::NoCertification).unwrap(),
            "\"No Certification\""
        );
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Finishes".parse::<Category>(), Ok(Category::Finishes));
        assert!("".parse::<Category>().is_err());
        assert!("roofing".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_labels_from_storage() {
        assert_eq!(Category::from_label(" Enclosure "), Some(Category::Enclosure));
        assert_eq!(
            Category::from_label("Green Roof"),
            Some(Category::Other("Green Roof".into()))
        );
        assert_eq!(Category::from_label(""), None);
        assert_eq!(Category::from_label("   "), None);

        let blank: Material = serde_json::from_str(r#"{"category": ""}"#).unwrap();
        assert_eq!(blank.category, None);
        assert_eq!(blank.category_label(), UNCATEGORIZED);

        let missing: Material = serde_json::from_str(r#"{"category": 7}"#).unwrap();
        assert_eq!(missing.category, None);
    }

    #[test]
    fn test_unknown_category_survives_serialization() {
        let m = Material {
            id: "r1".into(),
            category: Some(Category::Other("roofing".into())),
            ..Default::default()
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["category"], "roofing");
        let back: Material = serde_json::from_value(v).unwrap();
        assert_eq!(back, m);
    }
}
