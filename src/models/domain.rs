use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::distance::haversine_distance;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance to another point in kilometers
    #[inline]
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Gender category as stored on the user profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Man,
    Woman,
    #[default]
    #[serde(other)]
    Other,
}

/// A platform user as supplied by the roster provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_gender")]
    pub gender: Gender,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(rename = "livesIn", default, deserialize_with = "lenient_point")]
    pub lives_in: Option<GeoPoint>,
    /// Number of likes received; the provider sends the full collection
    #[serde(rename = "likesReceived", default, deserialize_with = "entry_count")]
    pub likes_received: usize,
}

/// A roster member keyed by its opaque identity
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub id: String,
    pub user: UserRecord,
}

impl RosterEntry {
    pub fn new(id: impl Into<String>, user: UserRecord) -> Self {
        Self { id: id.into(), user }
    }
}

/// Named geofence from the region catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in kilometers
    pub range: f64,
}

impl Region {
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Ages arrive as numbers or numeric strings depending on which client wrote the profile
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .or_else(|| n.as_f64().and_then(truncate_age)),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_age))
        }
        _ => None,
    })
}

/// Fractional ages count as the whole years already reached
fn truncate_age(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 0.0 {
        Some(value as u32)
    } else {
        None
    }
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

fn lenient_gender<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().and_then(Value::as_str) {
        Some("Man") => Gender::Man,
        Some("Woman") => Gender::Woman,
        _ => Gender::Other,
    })
}

fn lenient_point<'de, D>(deserializer: D) -> Result<Option<GeoPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        return Ok(None);
    };

    let latitude = map.get("latitude").and_then(Value::as_f64);
    let longitude = map.get("longitude").and_then(Value::as_f64);

    Ok(match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
        _ => None,
    })
}

/// Likes are stored either as a list of timestamps or as a keyed map
fn entry_count<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        _ => 0,
    })
}
