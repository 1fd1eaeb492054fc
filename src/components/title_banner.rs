use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{Frame, layout::Rect};

use super::Component;
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

pub const APP_TITLE: &str = "XWeatherApp";

/// Rows the tallest banner font needs.
pub const BANNER_HEIGHT: u16 = 6;

const GRADIENT_ANGLE: f32 = 5.0;
const GRADIENT_STEPS: usize = 8;

/// FIGlet app title. The gradient follows the last temperature and its
/// bright band sweeps across while a lookup is running.
pub struct TitleBanner;

pub struct TitleBannerProps {
    pub temperature_c: Option<i32>,
    pub is_animating: bool,
    pub tick_count: u32,
}

fn palette(temperature_c: Option<i32>) -> (ArtColor, ArtColor) {
    match temperature_c {
        None => (ArtColor::rgb(120, 170, 230), ArtColor::rgb(200, 225, 255)),
        Some(t) if t < 0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(215, 235, 255)),
        Some(t) if t < 15 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        Some(t) if t < 25 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        Some(t) if t < 35 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        Some(_) => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    }
}

fn phase(tick_count: u32) -> f32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % cycle) as f32 / cycle as f32
}

/// Cyclic edge → center → edge gradient shifted right by `phase` (0..1).
fn banner_fill((edge, center): (ArtColor, ArtColor), phase: f32) -> Fill {
    let stops = (0..=GRADIENT_STEPS)
        .map(|i| {
            let pos = i as f32 / GRADIENT_STEPS as f32;
            let source = (pos - phase).rem_euclid(1.0);
            let t = 1.0 - (2.0 * source - 1.0).abs();
            ColorStop::new(pos, edge.interpolate(center, t))
        })
        .collect();
    Fill::Linear(LinearGradient::new(GRADIENT_ANGLE, stops))
}

impl Component<Action> for TitleBanner {
    type Props<'a> = TitleBannerProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let phase = if props.is_animating {
            phase(props.tick_count)
        } else {
            0.0
        };

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(banner_fill(palette(props.temperature_c), phase));

        frame.render_widget(ArtBox::new(&renderer, APP_TITLE), area);
    }
}
