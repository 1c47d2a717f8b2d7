//! Environmental data normalizer.
//!
//! Turns ocean observations into alert levels and playable missions. The
//! thresholds follow the coral bleaching alert scale on Degree Heating Weeks.

use crate::folding::round_half_up;
use reefwright_data::{
    AlertLevel, DifficultyVector, EnvironmentalDataPoint, Mission, MissionStatus,
};

/// Classifies accumulated thermal stress. Boundaries are strict `<` comparisons.
#[must_use]
pub fn classify(dhw: f64) -> AlertLevel {
    if dhw.is_nan() || dhw < 2.0 {
        AlertLevel::NoStress
    } else if dhw < 4.0 {
        AlertLevel::Watch
    } else if dhw < 6.0 {
        AlertLevel::Warning
    } else if dhw < 8.0 {
        AlertLevel::Alert1
    } else {
        AlertLevel::Alert2
    }
}

/// Pollution difficulty assigned to each alert tier.
#[must_use]
pub fn alert_level_to_difficulty(level: AlertLevel) -> f64 {
    match level {
        AlertLevel::NoStress => 10.0,
        AlertLevel::Watch => 30.0,
        AlertLevel::Warning => 50.0,
        AlertLevel::Alert1 => 70.0,
        AlertLevel::Alert2 => 90.0,
    }
}

#[must_use]
pub fn rewards_for(level: AlertLevel) -> i64 {
    match level {
        AlertLevel::Alert2 => 300,
        AlertLevel::Alert1 => 250,
        AlertLevel::Warning => 200,
        AlertLevel::Watch => 150,
        AlertLevel::NoStress => 100,
    }
}

/// Ocean currents grow stronger away from the equator.
#[must_use]
pub fn currents_for_latitude(lat: f64) -> f64 {
    20.0 + (lat.abs() / 90.0) * 30.0
}

/// `reef_` followed by the lower-cased location, whitespace runs collapsed to `_`.
#[must_use]
pub fn mission_id(location: &str) -> String {
    let slug = location
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");
    format!("reef_{slug}")
}

/// Briefing text, one template per severity tier.
#[must_use]
pub fn describe(point: &EnvironmentalDataPoint) -> String {
    let sst = point.sst;
    match point.alert_level {
        AlertLevel::Alert1 | AlertLevel::Alert2 => format!(
            "CRITICAL: Mass bleaching under way. SST {sst}°C (+{:.1}°C anomaly), DHW {}. Immediate intervention required.",
            point.sst_anomaly, point.dhw
        ),
        AlertLevel::Warning => format!(
            "WARNING: Thermal stress is accumulating at {sst}°C. Bleaching expected within days. Deploy heat-resistant organisms."
        ),
        AlertLevel::Watch => format!(
            "WATCH: Elevated water temperature of {sst}°C. Monitor closely and prepare adaptive species."
        ),
        AlertLevel::NoStress => format!(
            "STABLE: Normal conditions at {sst}°C. A window for preventive reef strengthening."
        ),
    }
}

/// Difficulty vector synthesized from one observation.
#[must_use]
pub fn difficulty_for(point: &EnvironmentalDataPoint) -> DifficultyVector {
    DifficultyVector {
        temp: round_half_up(point.sst),
        virulence: round_half_up(point.dhw * 10.0),
        pollution: alert_level_to_difficulty(point.alert_level),
        currents: currents_for_latitude(point.coordinates.lat),
    }
}

#[must_use]
pub fn build_mission(point: &EnvironmentalDataPoint) -> Mission {
    Mission {
        id: mission_id(&point.location),
        title: point.location.clone(),
        location: point.coordinates,
        description: describe(point),
        difficulty: difficulty_for(point),
        status: MissionStatus::Available,
        rewards: rewards_for(point.alert_level),
    }
}

/// Planet temperature implied by the mean SST anomaly.
///
/// A zero anomaly maps to 40, every °C adds 20, clamped to `[0, 100]`.
/// Returns `None` for an empty slice.
#[must_use]
pub fn global_temperature(points: &[EnvironmentalDataPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let mean = points.iter().map(|p| p.sst_anomaly).sum::<f64>() / points.len() as f64;
    Some((40.0 + mean * 20.0).clamp(0.0, 100.0))
}
