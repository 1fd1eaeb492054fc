//! OpenWeatherMap client

use std::time::Duration;

use serde::Deserialize;

use crate::state::{Condition, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
const UNITS: &str = "metric";
const MAX_ERROR_BODY: usize = 200;

// ============================================================================
// Errors
// ============================================================================

/// Why a lookup failed. The UI shows one fixed message for all of these;
/// the variants only matter for the log.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response contained no weather condition")]
    MissingCondition,
}

// ============================================================================
// Provider payload
// ============================================================================

/// Current weather payload (`/data/2.5/weather`), metric units.
#[derive(Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReading,
    pub weather: Vec<WeatherEntry>,
    pub wind: WindReading,
}

#[derive(Debug, Deserialize)]
pub struct MainReading {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct WeatherEntry {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct WindReading {
    /// Metres per second
    pub speed: f64,
}

// ============================================================================
// Transform
// ============================================================================

/// Round to the nearest integer, halves toward positive infinity (2.5 → 3, -2.5 → -2).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn mps_to_kph(speed: f64) -> f64 {
    speed * 3.6
}

pub fn icon_url(icon: &str) -> String {
    format!("{}/{}@2x.png", ICON_BASE_URL, icon)
}

impl TryFrom<CurrentWeatherResponse> for WeatherSnapshot {
    type Error = FetchError;

    fn try_from(response: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let entry = response
            .weather
            .into_iter()
            .next()
            .ok_or(FetchError::MissingCondition)?;

        Ok(WeatherSnapshot {
            temperature_c: round_half_up(response.main.temp),
            humidity: response.main.humidity,
            condition: Condition {
                icon_url: icon_url(&entry.icon),
                text: entry.description,
                icon: entry.icon,
            },
            wind_kph: round_half_up(mps_to_kph(response.wind.speed)),
        })
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn current_weather_url(&self, city: &str) -> String {
        format!(
            "{}/data/2.5/weather?q={}&units={}&appid={}",
            self.base_url,
            urlencoding::encode(city),
            UNITS,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Fetch the raw current-weather payload for a city
    pub async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherResponse, FetchError> {
        tracing::debug!(city, "requesting current weather");

        let response = self.http.get(self.current_weather_url(city)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch and transform into the four displayed values
    pub async fn fetch_snapshot(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let snapshot = WeatherSnapshot::try_from(self.fetch_current(city).await?)?;
        tracing::info!(
            city,
            temperature_c = snapshot.temperature_c,
            humidity = snapshot.humidity,
            wind_kph = snapshot.wind_kph,
            "weather data received"
        );
        Ok(snapshot)
    }

    /// Like [`fetch_snapshot`](Self::fetch_snapshot), but never settles before
    /// `min_delay` has passed, so a loading indicator is always seen.
    pub async fn fetch_snapshot_paced(
        &self,
        city: &str,
        min_delay: Duration,
    ) -> Result<WeatherSnapshot, FetchError> {
        let (result, ()) = tokio::join!(self.fetch_snapshot(city), tokio::time::sleep(min_delay));
        result
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
