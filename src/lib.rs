//! XWeather - city weather lookup TUI
//!
//! The library exposes the app's modules so the binary and tests share them.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod logging;
pub mod reducer;
pub mod routing;
pub mod state;
