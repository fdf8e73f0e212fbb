//! # Drilling Records
//!
//! A [`WellRecord`] is one document from the already geo-filtered batch the
//! upstream store hands to the engine. Deserialization is deliberately
//! forgiving: an attribute of the wrong JSON type becomes `None` rather than
//! failing the whole batch, and a malformed `location` yields a record with
//! no point.
//!
//! Attributes the engine does not interpret are kept in [`WellRecord::extra`]
//! and serialized back out, so ranked results echo the original document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::geo::GeoPoint;

/// Sentinel label for absent or blank categorical values.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One drilling record as supplied by the upstream store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    /// Operating company.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,

    /// Permit / well status.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    /// Status bucket used for map symbology.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub map_status: Option<String>,

    /// Deviation type (vertical, horizontal, directional).
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub deviation: Option<String>,

    /// Mineral-rights indicator.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub mineral_ri: Option<String>,

    /// Status date as an ISO-like string.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_date: Option<String>,

    /// GeoJSON point geometry.
    #[serde(
        default,
        deserialize_with = "lenient_geometry",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<PointGeometry>,

    /// Attributes not interpreted by the engine, passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WellRecord {
    /// Company label, `"Unknown"` when absent or blank.
    pub fn company_label(&self) -> &str {
        label_or_unknown(&self.company)
    }

    /// Status label, `"Unknown"` when absent or blank.
    pub fn status_label(&self) -> &str {
        label_or_unknown(&self.status)
    }

    /// Map-status label, `"Unknown"` when absent or blank.
    pub fn map_status_label(&self) -> &str {
        label_or_unknown(&self.map_status)
    }

    /// Deviation label, `"Unknown"` when absent or blank.
    pub fn deviation_label(&self) -> &str {
        label_or_unknown(&self.deviation)
    }

    /// Mineral-rights label, `"Unknown"` when absent or blank.
    pub fn mineral_rights_label(&self) -> &str {
        label_or_unknown(&self.mineral_ri)
    }

    /// The record's location, if it is a point with finite coordinates.
    pub fn point(&self) -> Option<GeoPoint> {
        self.location.as_ref().and_then(PointGeometry::point)
    }
}

fn label_or_unknown(value: &Option<String>) -> &str {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => UNKNOWN_LABEL,
    }
}

/// A GeoJSON `Point` geometry.
///
/// Coordinates are held as raw JSON values so that a non-numeric entry
/// invalidates only this record's point, not the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// GeoJSON geometry type; only `"Point"` yields a location.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `[longitude, latitude, ...]`.
    #[serde(default)]
    pub coordinates: Vec<Value>,
}

impl PointGeometry {
    /// Build a `Point` geometry from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: vec![Value::from(lon), Value::from(lat)],
        }
    }

    /// Extract the point, requiring type `"Point"` and two finite numbers.
    pub fn point(&self) -> Option<GeoPoint> {
        if self.kind != "Point" {
            return None;
        }
        let lon = self.coordinates.first()?.as_f64()?;
        let lat = self.coordinates.get(1)?.as_f64()?;
        let point = GeoPoint::new(lon, lat);
        point.is_finite().then_some(point)
    }
}

/// Accept strings as-is, render numbers and booleans, and drop anything else.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<PointGeometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
