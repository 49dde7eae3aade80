use std::time::Duration;

use chrono::TimeDelta;
use chrono_tz::Tz;
use clap::Parser;
use desk_display::transport::DEFAULT_BAUD_RATE;

#[derive(Debug, Parser)]
pub struct Args {
    /// Description of the serial device driving the display.
    #[arg(long, env = "DISPLAY_DEVICE", default_value = "Arduino Mega 2560")]
    pub device: String,

    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud_rate: u32,

    #[arg(long, env = "WEATHER_LOCATION", default_value = "Edmonton, Canada")]
    pub location: String,

    #[arg(long, env = "TZ", default_value = "America/Edmonton")]
    pub timezone: Tz,

    #[arg(long, env = "OWM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value_t = 10)]
    pub tick_secs: u64,

    #[arg(long, default_value_t = 1800)]
    pub weather_interval_secs: u32,

    #[arg(long, default_value_t = 30)]
    pub http_timeout_secs: u64,
}

impl Args {
    pub fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    pub fn weather_interval(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.weather_interval_secs))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
