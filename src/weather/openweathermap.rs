use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};
use serde::Deserialize;

use crate::weather::{Observation, WeatherSource};

// Ref: https://openweathermap.org/current#name
const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub weather: Vec<WeatherDescription>,

    pub main: MainReadings,
}

#[derive(Debug, Deserialize)]
pub struct WeatherDescription {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

impl TryFrom<CurrentWeatherResponse> for Observation {
    type Error = anyhow::Error;

    fn try_from(response: CurrentWeatherResponse) -> Result<Self> {
        let description = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("weather response has no conditions"))?
            .description;

        Ok(Observation {
            temperature_celsius: response.main.temp,
            description,
        })
    }
}

#[derive(Debug)]
pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: String,
}

impl OpenWeatherMap {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, api_key })
    }
}

impl WeatherSource for OpenWeatherMap {
    async fn fetch(&self, location: &str) -> Result<Observation> {
        let response: CurrentWeatherResponse = self
            .client
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .context("failed to send weather request")?
            .error_for_status()
            .context("weather service returned an error")?
            .json()
            .await
            .context("failed to parse weather response")?;

        response.try_into()
    }
}
