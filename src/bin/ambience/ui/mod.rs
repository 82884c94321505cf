//! Layout and drawing

mod sounds;
pub mod spectrum;
mod transport;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

use sounds::render_sounds;
use spectrum::render_spectrum;
use transport::{render_transport, AudioStats};
use waveform::render_waveform;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status + volume
            Constraint::Min(10),   // Sounds | scopes
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    let stats = AudioStats::from_buffer(&app.audio_buffer);
    render_transport(frame, rows[0], &app.status.borrow(), app.engine.volume(), &stats);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(30)])
        .split(rows[1]);
    render_sounds(frame, columns[0], &app.sounds, app.selected, app.engine.active_sound());

    let scopes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    render_waveform(frame, scopes[0], &app.audio_buffer);
    let spectrum = app.spectrum.as_ref().map(|s| s.data()).unwrap_or(&[]);
    render_spectrum(frame, scopes[1], spectrum);

    let help = Paragraph::new(" [↑↓] Select  [Enter] Play  [Space] Stop  [+/-] Volume  [Q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[2]);
}
