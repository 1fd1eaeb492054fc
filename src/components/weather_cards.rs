use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::state::WeatherSnapshot;

/// Below this width the cards wrap into a 2x2 grid.
const ROW_MIN_WIDTH: u16 = 72;
/// Border, icon and up to three wrapped value lines.
const CARD_HEIGHT: u16 = 6;

/// One labelled value
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub title: &'static str,
    pub icon: &'static str,
    pub value: String,
    pub accent: Color,
}

/// The four cards for a snapshot, in display order.
pub fn cards(snapshot: &WeatherSnapshot) -> [Card; 4] {
    [
        Card {
            title: "Temperature",
            icon: "\u{1f321}\u{fe0f}",
            value: format!("{}°C", snapshot.temperature_c),
            accent: temperature_color(snapshot.temperature_c),
        },
        Card {
            title: "Humidity",
            icon: "\u{1f4a7}",
            value: format!("{}%", snapshot.humidity),
            accent: Color::Blue,
        },
        Card {
            title: "Condition",
            icon: snapshot.condition.emoji(),
            value: snapshot.condition.text.clone(),
            accent: Color::Gray,
        },
        Card {
            title: "Wind Speed",
            icon: "\u{1f4a8}",
            value: format!("{} km/h", snapshot.wind_kph),
            accent: Color::Cyan,
        },
    ]
}

fn temperature_color(celsius: i32) -> Color {
    match celsius {
        t if t < 0 => Color::Rgb(150, 200, 255),
        t if t < 15 => Color::Rgb(100, 180, 255),
        t if t < 25 => Color::Rgb(100, 200, 150),
        t if t < 35 => Color::Rgb(255, 180, 80),
        _ => Color::Rgb(255, 80, 70),
    }
}

pub struct WeatherCards;

pub struct WeatherCardsProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
}

/// Card slots: one row when wide enough, otherwise two rows of two.
fn card_areas(area: Rect) -> Vec<Rect> {
    let columns = |row: Rect, n: usize| {
        Layout::horizontal(vec![Constraint::Fill(1); n])
            .spacing(1)
            .split(row)
            .to_vec()
    };

    if area.width >= ROW_MIN_WIDTH {
        let row = Layout::vertical([Constraint::Length(CARD_HEIGHT)])
            .flex(Flex::Start)
            .split(area)[0];
        columns(row, 4)
    } else {
        let rows = Layout::vertical([
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(CARD_HEIGHT),
        ])
        .split(area);
        let mut areas = columns(rows[0], 2);
        areas.extend(columns(rows[1], 2));
        areas
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(card.title).centered().bold());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(card.icon).centered(),
        Line::from(card.value.as_str())
            .centered()
            .style(Style::default().fg(card.accent).bold()),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

impl Component<Action> for WeatherCards {
    type Props<'a> = WeatherCardsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        for (card, slot) in cards(props.snapshot).iter().zip(card_areas(area)) {
            render_card(frame, slot, card);
        }
    }
}
