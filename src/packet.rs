//! Fixed-width status line understood by the display firmware.
//!
//! ```text
//! 14053035 22J 55 70!
//! ^^^^^^^^^            hour, minute, weekday (0 = Sunday), month, day
//!          ^^^         temperature (2 chars) and condition code
//!             ^^^^^^   CPU% and memory%, 3 chars each
//!                   ^  terminator
//! ```
//!
//! The firmware parses by position, so every field has a constant width.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::{metrics::MetricSample, weather::WeatherSample};

pub const TIMESTAMP_LEN: usize = 9;
pub const WEATHER_LEN: usize = 3;
pub const METRICS_LEN: usize = 6;
pub const PACKET_LEN: usize = TIMESTAMP_LEN + WEATHER_LEN + METRICS_LEN + 1;

pub const PACKET_TERMINATOR: u8 = b'!';
pub const SHUTDOWN_BYTE: u8 = b'*';

/// Weather field sent before the first successful fetch.
pub const NO_WEATHER: &str = "  _";

/// Index of the tens digit of the day of month in the raw timestamp.
const DAY_TENS_INDEX: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPacket(String);

impl StatusPacket {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

pub fn encode(
    now: DateTime<Tz>,
    weather: Option<&WeatherSample>,
    metrics: &MetricSample,
) -> StatusPacket {
    let mut packet = String::with_capacity(PACKET_LEN);
    packet.push_str(&encode_timestamp(now));
    packet.push_str(&encode_weather(weather));
    packet.push_str(&encode_metrics(metrics));
    packet.push(PACKET_TERMINATOR as char);

    StatusPacket(packet)
}

/// A zero tens digit of the day is dropped and replaced by a trailing space,
/// which is what the firmware expects for days 1 to 9.
pub fn encode_timestamp(now: DateTime<Tz>) -> String {
    let mut timestamp = now.format("%H%M%w%m%d").to_string();
    if timestamp.as_bytes()[DAY_TENS_INDEX] == b'0' {
        timestamp.remove(DAY_TENS_INDEX);
        timestamp.push(' ');
    }

    timestamp
}

pub fn encode_weather(weather: Option<&WeatherSample>) -> String {
    match weather {
        Some(sample) => format!("{:>2}{}", sample.temperature_celsius, sample.code),
        None => NO_WEATHER.to_string(),
    }
}

pub fn encode_metrics(metrics: &MetricSample) -> String {
    format!("{:>3}{:>3}", metrics.cpu_percent, metrics.memory_percent)
}
