use std::io::Write;

use anyhow::{Context as _, Result};
use chrono::{DateTime, TimeDelta, Timelike as _};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::{
    metrics::MetricSample,
    packet::{self, StatusPacket},
    transport,
    weather::{WeatherSample, WeatherSource, should_refresh},
};

/// State carried across ticks of the send loop.
#[derive(Debug)]
pub struct Session<W> {
    last_fetched_at: Option<DateTime<Tz>>,

    weather: Option<WeatherSample>,

    now: DateTime<Tz>,

    refresh_interval: TimeDelta,

    transport: W,
}

impl<W> Session<W> {
    pub fn last_fetched_at(&self) -> Option<DateTime<Tz>> {
        self.last_fetched_at
    }

    pub fn weather(&self) -> Option<&WeatherSample> {
        self.weather.as_ref()
    }
}

impl<W: Write> Session<W> {
    pub fn new(transport: W, now: DateTime<Tz>, refresh_interval: TimeDelta) -> Self {
        Self {
            last_fetched_at: None,
            weather: None,
            now,
            refresh_interval,
            transport,
        }
    }

    pub fn weather_is_stale(&self) -> bool {
        should_refresh(self.now, self.last_fetched_at, self.refresh_interval)
    }

    /// Fetches new weather. The attempt time is recorded before the request,
    /// so a failure still waits out the full refresh interval. On failure
    /// the previous sample stays in place.
    pub async fn refresh_weather<S: WeatherSource>(&mut self, source: &S, location: &str) {
        self.last_fetched_at = Some(self.now);

        info!(location, "making weather request");

        match fetch_sample(source, location, self.now.hour()).await {
            Ok(sample) => {
                debug!(?sample, "weather updated");
                self.weather = Some(sample);
            }
            Err(err) => warn!("weather request failed: {err:#}"),
        }
    }

    /// One pass of the send loop: refresh stale weather, encode, transmit.
    pub async fn tick<S: WeatherSource>(
        &mut self,
        now: DateTime<Tz>,
        source: &S,
        location: &str,
        metrics: MetricSample,
    ) -> Result<StatusPacket> {
        self.now = now;

        if self.weather_is_stale() {
            self.refresh_weather(source, location).await;
        }

        let packet = packet::encode(self.now, self.weather.as_ref(), &metrics);
        transport::send_packet(&mut self.transport, packet.as_bytes())
            .context("failed to send status packet")?;
        debug!(packet = packet.as_str(), "sent status packet");

        Ok(packet)
    }

    /// Signals shutdown to the display and hands back the transport.
    pub fn close(mut self) -> Result<W> {
        transport::send_terminator(&mut self.transport)?;

        Ok(self.transport)
    }
}

async fn fetch_sample<S: WeatherSource>(
    source: &S,
    location: &str,
    local_hour: u32,
) -> Result<WeatherSample> {
    let observation = source
        .fetch(location)
        .await
        .context("failed to fetch weather")?;

    WeatherSample::from_observation(&observation, local_hour)
}
