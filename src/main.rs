//! XWeather - city weather lookup TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use xweather::action::Action;
use xweather::api::OpenWeatherClient;
use xweather::components::alert::{ALERT_HEIGHT, ALERT_WIDTH};
use xweather::components::{
    AlertDialog, AlertDialogProps, Component, WeatherDisplay, WeatherDisplayProps,
};
use xweather::config::{ConfigError, FileConfig, Overrides, RuntimeConfig};
use xweather::effect::Effect;
use xweather::logging;
use xweather::reducer::reducer;
use xweather::routing::{WeatherComponentId, WeatherContext};
use xweather::state::{AppState, LOADING_ANIM_TICK_MS};

/// XWeather - look up current weather for a city
#[derive(Parser, Debug)]
#[command(name = "xweather")]
#[command(about = "Look up current weather for a city (OpenWeatherMap)")]
struct Args {
    /// City to search for on startup
    #[arg(long, short)]
    city: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Provider base URL
    #[arg(long, env = "OPENWEATHER_BASE_URL")]
    base_url: Option<String>,

    /// Minimum time the loading indicator stays visible, in milliseconds
    #[arg(long)]
    min_delay_ms: Option<u64>,

    /// Config file (TOML). Defaults to <config dir>/xweather/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file. Defaults to <data dir>/xweather/xweather.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

/// What the fetch task needs, shared across spawned lookups
struct Lookup {
    client: OpenWeatherClient,
    min_delay: Duration,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        base_url,
        min_delay_ms,
        config,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let overrides = Overrides {
        api_key,
        base_url,
        min_delay_ms,
        log_file,
    };
    let config = match load_config(config, overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, ConfigError::MissingApiKey) {
                eprintln!(
                    "Set OPENWEATHER_API_KEY, pass --api-key, or add api_key to the config file."
                );
            }
            std::process::exit(1);
        }
    };

    logging::init(config.log_file.as_deref())?;
    tracing::info!(base_url = %config.base_url, min_delay = ?config.min_delay, "starting");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let lookup = Arc::new(Lookup {
        client: OpenWeatherClient::new(config.api_key).with_base_url(config.base_url),
        min_delay: config.min_delay,
    });

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let initial_action = city.map(Action::SearchQuerySubmit);
    let result = run_app(&mut terminal, &debug, store, lookup, initial_action, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

fn load_config(
    path: Option<PathBuf>,
    overrides: Overrides,
) -> Result<RuntimeConfig, ConfigError> {
    let file = match path.or_else(FileConfig::default_path) {
        Some(path) => FileConfig::load(&path)?,
        None => FileConfig::default(),
    };
    RuntimeConfig::resolve(overrides, file)
}

struct WeatherUi {
    display: WeatherDisplay,
    alert: AlertDialog,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
            alert: AlertDialog::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        event_ctx.set_component_area(WeatherComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.alert_open(),
        };
        self.display.render(frame, area, props);

        if let Some(message) = state.alert.as_deref() {
            let modal_area = centered_rect(ALERT_WIDTH, ALERT_HEIGHT, area);
            event_ctx.set_component_area(WeatherComponentId::Alert, modal_area);
            let props = AlertDialogProps {
                message,
                is_focused: render_ctx.is_focused(),
                on_dismiss: || Action::AlertDismiss,
            };
            self.alert.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&WeatherComponentId::Alert);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_alert_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(message) = state.alert.as_deref() else {
            return HandlerResponse::ignored();
        };
        let props = AlertDialogProps {
            message,
            is_focused: true,
            on_dismiss: || Action::AlertDismiss,
        };
        let actions: Vec<_> = self.alert.handle_event(event, props).into_iter().collect();
        // Blocking: swallow everything while the alert is up.
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    lookup: Arc<Lookup>,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(WeatherComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_alert = Rc::clone(&ui);
    bus.register(WeatherComponentId::Alert, move |event, state| {
        ui_alert
            .borrow_mut()
            .handle_alert_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, Arc::clone(&lookup)),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, lookup: Arc<Lookup>) {
    match effect {
        Effect::FetchWeather { city } => {
            // Same key every time: a new search replaces the one in flight.
            ctx.tasks().spawn("weather", async move {
                match lookup
                    .client
                    .fetch_snapshot_paced(&city, lookup.min_delay)
                    .await
                {
                    Ok(snapshot) => Action::WeatherDidLoad(snapshot),
                    Err(e) => {
                        tracing::error!(city = %city, error = %e, "error fetching weather data");
                        Action::WeatherDidError(e.to_string())
                    }
                }
            });
        }
    }
}
