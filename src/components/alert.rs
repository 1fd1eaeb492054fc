use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;

pub const ALERT_WIDTH: u16 = 44;
pub const ALERT_HEIGHT: u16 = 7;

/// Blocking notification. While open it owns all input.
pub struct AlertDialog {
    modal: Modal,
}

pub struct AlertDialogProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
    pub on_dismiss: fn() -> Action,
}

impl Default for AlertDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl AlertDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for AlertDialog {
    type Props<'a> = AlertDialogProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some((props.on_dismiss)()),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(ALERT_WIDTH, ALERT_HEIGHT, area);
        let message = props.message;

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Length(1), // blank
                Constraint::Length(1), // Message
                Constraint::Length(1), // blank
                Constraint::Length(1), // Hint
            ])
            .flex(Flex::Center)
            .split(content_area);

            frame.render_widget(
                Paragraph::new(Line::from("\u{26a0}\u{fe0f}  Alert").centered().bold()),
                chunks[0],
            );
            frame.render_widget(
                Paragraph::new(
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::Rgb(230, 120, 120)),
                    ))
                    .centered(),
                ),
                chunks[2],
            );
            frame.render_widget(
                Paragraph::new(
                    Line::from(vec![
                        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
                        Span::styled(" to dismiss", Style::default().fg(Color::DarkGray)),
                    ])
                    .centered(),
                ),
                chunks[4],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(45, 30, 35)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: props.on_dismiss,
                render_content: &mut render_content,
            },
        );
    }
}
