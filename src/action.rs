//! Actions - everything that can happen to the app

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherSnapshot;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Search input text changed
    SearchQueryChange(String),

    /// Submit the query (Enter); blank queries are ignored
    SearchQuerySubmit(String),

    // ===== Weather category =====
    /// Result: provider answered and the payload was transformed
    WeatherDidLoad(WeatherSnapshot),

    /// Result: lookup failed (detail is for diagnostics only)
    WeatherDidError(String),

    // ===== Alert category =====
    /// Close the blocking alert
    AlertDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    /// Periodic tick for the loading animation
    Tick,

    /// Exit the application
    Quit,
}
