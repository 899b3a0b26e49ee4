//! Synchronous client for the **GIOŚ air-quality REST API** (`pjp-api/rest`).
//!
//! Three read-only endpoints are used:
//! - `station/findAll`: every monitoring station (`id`, `stationName`)
//! - `station/sensors/{stationId}`: sensors of one station (`id`, `param.paramName`)
//! - `data/getData/{sensorId}`: recent readings (`values: [{date, value}]`)
//!
//! ### Notes
//! - One request per call. Failures are reported, never retried.
//! - Network timeouts use a sane default (30s) and can be adjusted by editing the client builder.
//!
//! Typical usage:
//! ```no_run
//! # use gios_rs::Client;
//! let client = Client::default();
//! let stations = client.fetch_stations()?;
//! let sensors = client.fetch_sensors(stations[0].id)?;
//! let data = client.fetch_data(sensors[0].id)?;
//! # Ok::<(), gios_rs::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::models::{Sensor, SensorData, Station};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.gios.gov.pl/pjp-api/rest";

/// Where stations, sensors and readings come from.
///
/// [`Client`] talks to the live API; tests plug in canned data.
pub trait AirQualitySource {
    fn stations(&self) -> Result<Vec<Station>>;
    fn sensors(&self, station_id: u32) -> Result<Vec<Sensor>>;
    fn readings(&self, sensor_id: u32) -> Result<SensorData>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Client {
    /// Client for an API root such as [`DEFAULT_BASE_URL`]; a trailing `/` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("gios_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Network(format!("GET {url}: HTTP {status}")));
        }
        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| Error::Parse(format!("GET {url}: {e}")))
    }

    /// All stations, in API order.
    pub fn fetch_stations(&self) -> Result<Vec<Station>> {
        let stations: Vec<Station> = self.get_json("station/findAll")?;
        log::info!("loaded {} stations", stations.len());
        Ok(stations)
    }

    /// Sensors installed at `station_id`.
    pub fn fetch_sensors(&self, station_id: u32) -> Result<Vec<Sensor>> {
        let sensors: Vec<Sensor> = self.get_json(&format!("station/sensors/{station_id}"))?;
        log::info!("station {station_id}: {} sensors", sensors.len());
        Ok(sensors)
    }

    /// Raw readings of `sensor_id` as the API returns them (unfiltered, unsorted).
    pub fn fetch_data(&self, sensor_id: u32) -> Result<SensorData> {
        let data: SensorData = self.get_json(&format!("data/getData/{sensor_id}"))?;
        log::info!(
            "sensor {sensor_id}: {} readings",
            data.values.as_ref().map_or(0, Vec::len)
        );
        Ok(data)
    }
}

impl AirQualitySource for Client {
    fn stations(&self) -> Result<Vec<Station>> {
        self.fetch_stations()
    }

    fn sensors(&self, station_id: u32) -> Result<Vec<Sensor>> {
        self.fetch_sensors(station_id)
    }

    fn readings(&self, sensor_id: u32) -> Result<SensorData> {
        self.fetch_data(sensor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = Client::new("http://localhost:8080/rest/");
        assert_eq!(client.base_url, "http://localhost:8080/rest");
        assert_eq!(Client::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn unreachable_host_is_network_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let client = Client::new("http://127.0.0.1:9");
        assert!(matches!(client.fetch_stations(), Err(Error::Network(_))));
    }
}
