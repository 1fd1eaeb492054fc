//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, FETCH_FAILED_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(query) => {
            let city = query.trim().to_string();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }
            state.query = query;
            // The previous snapshot is discarded, not kept around during the fetch.
            state.weather = DataResource::Loading;
            state.alert = None;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchWeather { city })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(snapshot) => {
            state.weather = DataResource::Loaded(snapshot);
            DispatchResult::changed()
        }

        Action::WeatherDidError(detail) => {
            state.weather = DataResource::Failed(detail);
            state.alert = Some(FETCH_FAILED_MESSAGE.to_string());
            DispatchResult::changed()
        }

        // ===== Alert actions =====
        Action::AlertDismiss => {
            if state.alert.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global actions =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
