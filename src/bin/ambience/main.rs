//! ambience - audition soundscapes from the terminal
//!
//! Run with: cargo run -- [sound]
//! Logs go to ambience.log; set AMBIENCE_LOG to change the filter.

mod app;
mod ui;

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use ambience::{Engine, EngineConfig};
use app::App;

/// Samples the scope tap can buffer between UI frames.
const SCOPE_CAPACITY: usize = 16_384;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let (scope_tx, scope_rx) = rtrb::RingBuffer::new(SCOPE_CAPACITY);
    let engine = Engine::builder()
        .config(EngineConfig::default())
        .scope(scope_tx)
        .build();

    let mut app = App::new(engine, scope_rx);
    if let Some(sound) = std::env::args().nth(1) {
        app.play(&sound);
    }

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

fn init_tracing() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_env("AMBIENCE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let file = File::create("ambience.log").wrap_err("failed to create ambience.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok();
    Ok(())
}
