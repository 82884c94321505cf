//! Application state and event loop

use std::{cell::RefCell, rc::Rc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use rtrb::Consumer;

use ambience::{engine::STATUS_NOT_PLAYING, Engine};

use crate::ui::{self, spectrum::SpectrumAnalyzer};

/// Audio visualization buffer size
pub const VIS_BUFFER_SIZE: usize = 1024;

/// Volume change per keypress
const VOLUME_STEP: f32 = 0.05;

pub struct App {
    pub engine: Engine,
    /// Post-master samples from the renderer
    scope_rx: Consumer<f32>,
    /// Last text the engine reported
    pub status: Rc<RefCell<String>>,
    pub sounds: Vec<String>,
    pub selected: usize,
    pub audio_buffer: Vec<f32>,
    pub spectrum: Option<SpectrumAnalyzer>,
    should_quit: bool,
}

impl App {
    pub fn new(mut engine: Engine, scope_rx: Consumer<f32>) -> Self {
        let status = Rc::new(RefCell::new(STATUS_NOT_PLAYING.to_string()));
        let sink = status.clone();
        engine.on_status(move |text| *sink.borrow_mut() = text.to_string());

        let sounds = engine.sounds().iter().map(|d| d.name.clone()).collect();

        Self {
            engine,
            scope_rx,
            status,
            sounds,
            selected: 0,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: None,
            should_quit: false,
        }
    }

    pub fn play(&mut self, sound: &str) {
        if let Some(index) = self.sounds.iter().position(|s| s == sound) {
            self.selected = index;
        }
        self.engine.play(sound);
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.engine.poll();
            self.poll_audio();

            terminal.draw(|frame| ui::render(frame, self))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.engine.stop();
        Ok(())
    }

    /// Keep the newest VIS_BUFFER_SIZE samples from the scope tap
    fn poll_audio(&mut self) {
        let available = self.scope_rx.slots();
        if available == 0 {
            return;
        }
        while let Ok(sample) = self.scope_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }

        if self.spectrum.is_none() {
            if let Some(sample_rate) = self.engine.sample_rate() {
                self.spectrum = Some(SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate));
            }
        }
        if let Some(spectrum) = self.spectrum.as_mut() {
            spectrum.update(&self.audio_buffer);
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(self.sounds.len() - 1);
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % self.sounds.len();
            }
            KeyCode::Enter => {
                if let Some(sound) = self.sounds.get(self.selected).cloned() {
                    self.engine.play(&sound);
                }
            }
            KeyCode::Char(' ') => self.engine.stop(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.engine.set_volume(self.engine.volume() + VOLUME_STEP);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.engine.set_volume(self.engine.volume() - VOLUME_STEP);
            }
            _ => {}
        }
    }
}
