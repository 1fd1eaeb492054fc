use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::SEARCH_PLACEHOLDER;

pub const SEARCH_BUTTON: &str = "[ Search ]";

/// City input plus the Search button label
pub struct SearchBar {
    input: TextInput,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_query_submit: fn(String) -> Action,
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
            bg: Some(Color::Rgb(50, 50, 60)),
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.code == KeyCode::Enter {
            return vec![(props.on_query_submit)(props.query.to_string())];
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([
            Constraint::Min(10),                            // Input
            Constraint::Length(1),                          // Gap
            Constraint::Length(SEARCH_BUTTON.len() as u16), // Button
        ])
        .split(area);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: props.on_query_change,
            on_submit: props.on_query_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let button_style = if props.query.trim().is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        };
        let button_area = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(chunks[2])[0];
        frame.render_widget(
            Paragraph::new(Line::styled(SEARCH_BUTTON, button_style)),
            button_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props(query: &str, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            query,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_query_submit: Action::SearchQuerySubmit,
        }
    }

    #[test]
    fn test_enter_submits_current_query() {
        let mut bar = SearchBar::new();
        let enter = EventKind::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let actions: Vec<_> = bar
            .handle_event(&enter, props("London", true))
            .into_iter()
            .collect();

        actions.assert_count(1);
        actions.assert_first(Action::SearchQuerySubmit("London".into()));
    }

    #[test]
    fn test_unfocused_ignores_input() {
        let mut bar = SearchBar::new();

        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("a")), props("", false))
            .into_iter()
            .collect();

        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_query_and_button() {
        let mut render = RenderHarness::new(50, 3);
        let mut bar = SearchBar::new();

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props("Paris", true));
        });

        assert!(output.contains("Paris"), "got:\n{}", output);
        assert!(output.contains(SEARCH_BUTTON), "got:\n{}", output);
    }
}
