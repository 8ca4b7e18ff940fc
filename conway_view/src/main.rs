// main.rs - Desktop front end for the conway engine
// Owns the board, the runner and the tokio runtime the runner ticks on.

use eframe::egui;
use egui::Color32;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use conway::{rate_for_interval, Board, Runner, RunnerEvent, Settings, SharedBoard};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = Settings::default();
    settings.validate()?;
    let app = LifeView::new(settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}

/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,conway=debug,conway_view=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub struct LifeView {
    // Dropped before the runtime its task lives on
    runner: Runner,
    events: broadcast::Receiver<RunnerEvent>,
    board: SharedBoard,
    _runtime: tokio::runtime::Runtime,

    pub is_running: bool,          // Follows Started/Stopped, drives the button label
    pub steps_per_second: u32,
    pub selected_pattern: usize,
    pub pattern_path: String,
    pub status: Option<String>,
    pub live_color: Color32,
    pub dead_color: Color32,
}

impl LifeView {
    fn new(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
        let runtime = tokio::runtime::Runtime::new()?;
        let board = Board::new(settings.width, settings.height)?.into_shared();
        let runner = Runner::with_settings(board.clone(), &settings, runtime.handle().clone());
        let events = runner.subscribe();

        info!(
            width = settings.width,
            height = settings.height,
            interval_ms = settings.tick_interval.as_millis() as u64,
            "viewer ready"
        );

        Ok(Self {
            steps_per_second: rate_for_interval(settings.tick_interval),
            runner,
            events,
            board,
            _runtime: runtime,
            is_running: false,
            selected_pattern: 0,
            pattern_path: format!("pattern.{}", conway::pattern_file::PATTERN_EXTENSION),
            status: None,
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
        })
    }
}
