use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level reply of the feature server.
///
/// A rejected query still comes back with HTTP 200, carrying `error` instead of `features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "Vec::new")]
    pub features: Vec<Feature<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceFault>,
}

impl<T> Envelope<T> {
    /// Unwrap the `attributes` of every feature, keeping server order.
    pub fn into_attributes(self) -> Vec<T> {
        self.features.into_iter().map(|f| f.attributes).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<T> {
    pub attributes: T,
}

/// Error object the server returns in place of `features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFault {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

/// One country's snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRecord {
    #[serde(rename = "OBJECTID")]
    pub id: i64,
    #[serde(rename = "Country_Region")]
    pub country: String,
    /// Epoch milliseconds.
    #[serde(rename = "Last_Update", deserialize_with = "de_count")]
    pub last_update: i64,
    #[serde(rename = "Lat", deserialize_with = "de_coord")]
    pub latitude: f64,
    #[serde(rename = "Long_", deserialize_with = "de_coord")]
    pub longitude: f64,
    #[serde(rename = "Confirmed", deserialize_with = "de_count")]
    pub confirmed: i64,
    #[serde(rename = "Active", deserialize_with = "de_count")]
    pub active: i64,
    #[serde(rename = "Recovered", deserialize_with = "de_count")]
    pub recovered: i64,
    #[serde(rename = "Deaths", deserialize_with = "de_count")]
    pub deaths: i64,
}

impl CaseRecord {
    /// `last_update` as a UTC timestamp, or `None` if out of range.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_update)
    }
}

/// Id/name pair from the country index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryIndexEntry {
    #[serde(rename = "OBJECTID")]
    pub id: i64,
    #[serde(rename = "Country_Region")]
    pub name: String,
}

/// Result row of a sum statistic query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStat {
    #[serde(deserialize_with = "de_count")]
    pub value: i64,
}

/// The numeric fields the server can sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Active,
    Confirmed,
    Recovered,
    Deaths,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Active,
        Metric::Confirmed,
        Metric::Recovered,
        Metric::Deaths,
    ];

    /// Attribute name on the wire.
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::Active => "Active",
            Metric::Confirmed => "Confirmed",
            Metric::Recovered => "Recovered",
            Metric::Deaths => "Deaths",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Metric::ALL
            .into_iter()
            .find(|m| m.field_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

/// Serde helper: parse an `i64` count from a JSON integer, an integral float,
/// a numeric string, or `null` (which becomes 0).
fn de_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an integer, an integral float, a numeric string, or null")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(|_| E::custom("count overflows i64"))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.fract() != 0.0 || !(i64::MIN as f64..=i64::MAX as f64).contains(&v) {
                return Err(E::custom(format!("non-integral count {v}")));
            }
            Ok(v as i64)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<i64>().map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

fn de_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
