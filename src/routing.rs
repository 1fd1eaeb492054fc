//! Event routing - which component receives input
//!
//! While the alert is open it is both focused and modal, so the search bar
//! gets nothing until the alert is dismissed.

use tui_dispatch::EventRoutingState;

use crate::state::AppState;

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum WeatherComponentId {
    Display,
    Alert,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherContext {
    Main,
    Alert,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        if self.alert_open() {
            Some(WeatherComponentId::Alert)
        } else {
            Some(WeatherComponentId::Display)
        }
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        if self.alert_open() {
            Some(WeatherComponentId::Alert)
        } else {
            None
        }
    }

    fn binding_context(&self, id: WeatherComponentId) -> WeatherContext {
        match id {
            WeatherComponentId::Display => WeatherContext::Main,
            WeatherComponentId::Alert => WeatherContext::Alert,
        }
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::reducer::reducer;

    fn routed(state: &AppState) -> (Option<WeatherComponentId>, Option<WeatherComponentId>) {
        (state.focused(), state.modal())
    }

    #[test]
    fn test_search_bar_has_input_by_default() {
        let state = AppState::default();
        assert_eq!(routed(&state), (Some(WeatherComponentId::Display), None));
        assert!(matches!(state.default_context(), WeatherContext::Main));
    }

    #[test]
    fn test_alert_captures_input_until_dismissed() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchQuerySubmit("InvalidCity123".into()));
        reducer(&mut state, Action::WeatherDidError("404".into()));

        assert_eq!(
            routed(&state),
            (Some(WeatherComponentId::Alert), Some(WeatherComponentId::Alert))
        );
        assert!(matches!(
            state.binding_context(WeatherComponentId::Alert),
            WeatherContext::Alert
        ));

        reducer(&mut state, Action::AlertDismiss);

        assert_eq!(routed(&state), (Some(WeatherComponentId::Display), None));
        assert!(matches!(
            state.binding_context(WeatherComponentId::Display),
            WeatherContext::Main
        ));
    }

    #[test]
    fn test_loading_does_not_block_input() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchQuerySubmit("Paris".into()));

        assert!(state.is_loading());
        assert_eq!(routed(&state), (Some(WeatherComponentId::Display), None));
    }
}
