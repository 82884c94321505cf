//! Status bar - engine status, output level and the volume gauge

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Level readout for the scope window, in dBFS.
pub struct AudioStats {
    pub peak_db: f32,
    pub rms_db: f32,
}

/// Floor shown for digital silence.
const SILENCE_DB: f32 = -96.0;

impl AudioStats {
    pub fn from_buffer(samples: &[f32]) -> Self {
        let to_db = |level: f32| (20.0 * level.max(1e-6).log10()).max(SILENCE_DB);
        let (peak, energy) = samples
            .iter()
            .fold((0.0f32, 0.0f32), |(peak, energy), &s| (peak.max(s.abs()), energy + s * s));
        let rms = (energy / samples.len().max(1) as f32).sqrt();
        Self {
            peak_db: to_db(peak),
            rms_db: to_db(rms),
        }
    }
}

pub fn render_transport(frame: &mut Frame, area: Rect, status: &str, volume: f32, stats: &AudioStats) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(area);

    let playing = status != ambience::engine::STATUS_NOT_PLAYING;
    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", if playing { "▶" } else { "■" }, status),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Peak {:>5.1} dB  RMS {:>5.1} dB", stats.peak_db, stats.rms_db),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    let status_bar = Paragraph::new(line).block(Block::default().title(" ambience ").borders(Borders::ALL));
    frame.render_widget(status_bar, columns[0]);

    let gauge = Gauge::default()
        .block(Block::default().title(" Volume ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(volume.clamp(0.0, 1.0) as f64)
        .label(format!("{:.0}%", volume * 100.0));
    frame.render_widget(gauge, columns[1]);
}
