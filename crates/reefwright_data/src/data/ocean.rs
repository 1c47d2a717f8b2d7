use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mission::GeoPoint;

/// Coral bleaching alert tiers derived from Degree Heating Weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    NoStress = 0,
    Watch = 1,
    Warning = 2,
    #[serde(rename = "ALERT_1")]
    Alert1 = 3,
    #[serde(rename = "ALERT_2")]
    Alert2 = 4,
}

impl AlertLevel {
    #[must_use]
    pub fn tier(&self) -> u8 {
        *self as u8
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            AlertLevel::NoStress => "🌊 No Stress",
            AlertLevel::Watch => "👀 Watch",
            AlertLevel::Warning => "⚠️ Warning",
            AlertLevel::Alert1 => "🚨 Alert 1",
            AlertLevel::Alert2 => "💀 Alert 2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    Live,
    Simulated,
}

/// One observation delivered by an environmental data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalDataPoint {
    pub location: String,
    pub coordinates: GeoPoint,
    /// Sea surface temperature, °C.
    pub sst: f64,
    /// Deviation from the site baseline, °C.
    pub sst_anomaly: f64,
    pub alert_level: AlertLevel,
    /// Degree Heating Weeks.
    pub dhw: f64,
    pub timestamp: DateTime<Utc>,
    pub source: DataSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_ordering() {
        assert!(AlertLevel::NoStress < AlertLevel::Watch);
        assert!(AlertLevel::Alert1 < AlertLevel::Alert2);
        assert_eq!(AlertLevel::Alert2.tier(), 4);
    }

    #[test]
    fn test_data_point_wire_shape() {
        let point = EnvironmentalDataPoint {
            location: "Great Barrier Reef".to_string(),
            coordinates: GeoPoint {
                lat: -18.2871,
                lon: 147.6992,
            },
            sst: 29.3,
            sst_anomaly: 2.8,
            alert_level: AlertLevel::Alert2,
            dhw: 11.2,
            timestamp: Utc::now(),
            source: DataSource::Simulated,
        };
        let value = serde_json::to_value(&point).unwrap();
        assert!(value.get("sstAnomaly").is_some());
        assert_eq!(value["alertLevel"], "ALERT_2");
        assert_eq!(value["source"], "SIMULATED");

        let back: EnvironmentalDataPoint = serde_json::from_value(value).unwrap();
        assert_eq!(back.alert_level, AlertLevel::Alert2);
    }
}
