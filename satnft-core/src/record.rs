use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One environmental sensor reading.
///
/// Measurements are kept as the JSON numbers the store returned so that the
/// record serializes back to the same text it was read from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub timestamp: String,
    pub temperature: Number,
    pub humidity: Number,
    pub light: Number,
    pub air_quality: Number,
}

impl TelemetryRecord {
    pub fn new(
        timestamp: impl Into<String>,
        temperature: impl Into<Number>,
        humidity: impl Into<Number>,
        light: impl Into<Number>,
        air_quality: impl Into<Number>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature: temperature.into(),
            humidity: humidity.into(),
            light: light.into(),
            air_quality: air_quality.into(),
        }
    }
}
