use anyhow::{Context as _, Result};
use tracing::warn;

use crate::weather::{Condition, Observation};

const MIN_TEMPERATURE_CELSIUS: i8 = -9;
const MAX_TEMPERATURE_CELSIUS: i8 = 99;

/// A weather reading reduced to what the display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherSample {
    pub temperature_celsius: i8,

    pub code: char,
}

impl WeatherSample {
    pub fn from_observation(observation: &Observation, local_hour: u32) -> Result<Self> {
        let condition: Condition = observation
            .description
            .parse()
            .context("failed to map weather description")?;

        let temperature_celsius = round_temperature(observation.temperature_celsius)
            .with_context(|| {
                format!(
                    "invalid temperature: {}",
                    observation.temperature_celsius
                )
            })?;

        Ok(Self {
            temperature_celsius,
            code: condition.code(local_hour),
        })
    }
}

// The display has two characters for the temperature, so anything outside
// -9..=99 is pinned to the nearest representable value.
fn round_temperature(celsius: f64) -> Option<i8> {
    if !celsius.is_finite() {
        return None;
    }

    let rounded = celsius.round();
    let clamped = rounded.clamp(
        MIN_TEMPERATURE_CELSIUS as f64,
        MAX_TEMPERATURE_CELSIUS as f64,
    );
    if clamped != rounded {
        warn!("temperature {rounded} does not fit the display, showing {clamped}");
    }

    Some(clamped as i8)
}
