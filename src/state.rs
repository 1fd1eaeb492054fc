//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Text of the blocking alert shown when a lookup fails, whatever the cause.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch weather data";

/// Shown below the search bar while a request is outstanding.
pub const LOADING_MESSAGE: &str = "Loading data...";

pub const SEARCH_PLACEHOLDER: &str = "Enter city name";

/// Condition as reported by the provider
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    /// Human-readable description ("light rain")
    pub text: String,
    /// Provider icon code ("10d")
    pub icon: String,
    /// Full URL of the provider's icon image
    pub icon_url: String,
}

impl Condition {
    /// Terminal stand-in for the provider's icon image.
    ///
    /// Icon codes are two digits for the condition group plus a day/night
    /// suffix; only the group matters here.
    pub fn emoji(&self) -> &'static str {
        match self.icon.get(..2).unwrap_or_default() {
            "01" => "\u{2600}\u{fe0f}",
            "02" => "\u{26c5}",
            "03" | "04" => "\u{2601}\u{fe0f}",
            "09" => "\u{1f326}\u{fe0f}",
            "10" => "\u{1f327}\u{fe0f}",
            "11" => "\u{26c8}\u{fe0f}",
            "13" => "\u{2744}\u{fe0f}",
            "50" => "\u{1f32b}\u{fe0f}",
            _ => "\u{2601}\u{fe0f}",
        }
    }
}

/// Weather values shown for one query
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub temperature_c: i32,
    pub humidity: u8,
    pub condition: Condition,
    pub wind_kph: i32,
}

/// Animation timing for the title gradient seam and the loading spinner.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text currently in the search input
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    /// Lookup lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Data", debug_fmt)]
    pub weather: DataResource<WeatherSnapshot>,

    /// Blocking alert; input goes to the alert until dismissed
    #[debug(section = "Weather", label = "Alert", debug_fmt)]
    pub alert: Option<String>,

    /// Animation frame counter while loading
    #[debug(skip)]
    pub tick_count: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            query: String::new(),
            weather: DataResource::Empty,
            alert: None,
            tick_count: 0,
        }
    }
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.weather.data()
    }

    pub fn alert_open(&self) -> bool {
        self.alert.is_some()
    }
}
