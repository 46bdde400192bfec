use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::domain::GeoPoint;

/// Operator-edited audience criteria
///
/// Every criterion is optional; an absent criterion places no constraint
/// on the audience. Deserialization is lenient so that raw form values
/// (numbers sent as text, blank inputs) land as absent instead of
/// poisoning the comparisons downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceCriteria {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub min_age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub max_age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub range: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_male: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_female: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_active_top_users: bool,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub percent_value: Option<u32>,
}

/// Text inputs on the audience filter surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaField {
    MinAge,
    MaxAge,
    Region,
    Latitude,
    Longitude,
    Range,
    UserName,
    PercentValue,
}

/// Checkbox inputs on the audience filter surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaFlag {
    Male,
    Female,
    ActiveTopUsers,
}

impl AudienceCriteria {
    /// True when no criterion would exclude anyone
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// The ad-hoc geofence, only when point and radius are all present
    pub fn ad_hoc_geofence(&self) -> Option<(GeoPoint, f64)> {
        match (self.latitude, self.longitude, self.range) {
            (Some(lat), Some(lon), Some(range)) => Some((GeoPoint::new(lat, lon), range)),
            _ => None,
        }
    }

    /// Percentage for the top-engagement cut, only when the flag is on
    pub fn top_percent(&self) -> Option<u32> {
        if self.is_active_top_users {
            self.percent_value
        } else {
            None
        }
    }

    /// Apply raw text typed into one of the inputs
    pub fn set_text(&mut self, field: CriteriaField, raw: &str) {
        match field {
            CriteriaField::MinAge => self.min_age = coerce_integer(raw),
            CriteriaField::MaxAge => self.max_age = coerce_integer(raw),
            CriteriaField::Region => self.region = coerce_text(raw),
            CriteriaField::Latitude => self.latitude = coerce_number(raw),
            CriteriaField::Longitude => self.longitude = coerce_number(raw),
            CriteriaField::Range => self.range = coerce_number(raw),
            CriteriaField::UserName => self.user_name = coerce_text(raw),
            CriteriaField::PercentValue => self.percent_value = coerce_integer(raw),
        }
    }

    /// Flip one of the checkboxes
    pub fn toggle(&mut self, flag: CriteriaFlag) {
        let slot = match flag {
            CriteriaFlag::Male => &mut self.is_male,
            CriteriaFlag::Female => &mut self.is_female,
            CriteriaFlag::ActiveTopUsers => &mut self.is_active_top_users,
        };
        *slot = !*slot;
    }
}

/// Parse a non-negative integer input, falling back to unset
pub fn coerce_integer(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Parse a finite decimal input, falling back to unset
pub fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn coerce_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => coerce_integer(&s),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => coerce_number(&s),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => coerce_text(&s),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}
