use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::title_banner::BANNER_HEIGHT;
use super::{
    Component, SearchBar, SearchBarProps, TitleBanner, TitleBannerProps, WeatherCards,
    WeatherCardsProps,
};
use crate::action::Action;
use crate::state::{AppState, LOADING_MESSAGE};

const SPINNER: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}",
    "\u{2827}", "\u{2807}", "\u{280f}",
];
const TICKS_PER_SPINNER_FRAME: u32 = 6;

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: title, search bar, loading line, cards, help bar
#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props(state: &AppState, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query: &state.query,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
        }
    }
}

fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNER[(tick_count / TICKS_PER_SPINNER_FRAME) as usize % SPINNER.len()]
}

fn status_line(state: &AppState) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    match &state.weather {
        DataResource::Loading => Line::from(vec![
            Span::styled(spinner_frame(state.tick_count), Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::raw(LOADING_MESSAGE),
        ]),
        DataResource::Empty => Line::from(vec![
            Span::styled("Type a city and press ", dim),
            Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
        ]),
        DataResource::Failed(_) => Line::styled("No weather data", dim),
        DataResource::Loaded(_) => Line::default(),
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            let ctrl_c =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.code == KeyCode::Esc || ctrl_c {
                return vec![Action::Quit];
            }
        }

        self.search
            .handle_event(event, Self::search_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Max(BANNER_HEIGHT), // Title
            Constraint::Length(1),          // Spacer
            Constraint::Length(3),          // Search bar
            Constraint::Length(1),          // Status
            Constraint::Length(1),          // Spacer
            Constraint::Min(1),             // Cards
            Constraint::Length(1),          // Help bar
        ])
        .split(area);

        let mut banner = TitleBanner;
        banner.render(
            frame,
            chunks[0],
            TitleBannerProps {
                temperature_c: state.snapshot().map(|s| s.temperature_c),
                is_animating: state.is_loading(),
                tick_count: state.tick_count,
            },
        );

        self.search.render(
            frame,
            chunks[2],
            Self::search_props(state, props.is_focused),
        );

        frame.render_widget(Paragraph::new(status_line(state).centered()), chunks[3]);

        if let Some(snapshot) = state.snapshot() {
            let mut cards = WeatherCards;
            cards.render(frame, chunks[5], WeatherCardsProps { snapshot });
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[6],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    #[test]
    fn test_esc_quits() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: true,
        };

        let event = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: true,
        };

        let event = EventKind::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_enter_submits_query_from_state() {
        let mut component = WeatherDisplay::new();
        let state = AppState {
            query: "Tokyo".into(),
            ..Default::default()
        };
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: true,
        };

        let event = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
        actions.assert_count(1);
        actions.assert_first(Action::SearchQuerySubmit("Tokyo".into()));
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut component = WeatherDisplay::new();
        let state = AppState::default();
        let props = WeatherDisplayProps {
            state: &state,
            is_focused: false,
        };

        let event = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let actions: Vec<_> = component.handle_event(&event, props).into_iter().collect();
        actions.assert_empty();
    }

    #[test]
    fn test_spinner_advances_slowly() {
        assert_eq!(spinner_frame(0), spinner_frame(TICKS_PER_SPINNER_FRAME - 1));
        assert_ne!(spinner_frame(0), spinner_frame(TICKS_PER_SPINNER_FRAME));
        assert_eq!(
            spinner_frame(0),
            spinner_frame(TICKS_PER_SPINNER_FRAME * SPINNER.len() as u32)
        );
    }
}
