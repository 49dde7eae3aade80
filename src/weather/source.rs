use std::future::Future;

use anyhow::Result;

/// Raw current conditions as reported by a weather service.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub temperature_celsius: f64,

    pub description: String,
}

pub trait WeatherSource {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Observation>>;
}
