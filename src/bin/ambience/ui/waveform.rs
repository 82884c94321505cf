//! Oscilloscope of the post-master output.
//!
//! Beds sit well below full scale, so the vertical range follows the
//! loudest sample on screen instead of a fixed ±1.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Smallest half-range shown, so silence doesn't zoom into float noise.
const MIN_RANGE: f32 = 0.05;

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let range = samples
        .iter()
        .fold(MIN_RANGE, |acc, s| acc.max(s.abs()))
        .min(1.0) as f64;

    let len = samples.len().max(1) as f64;
    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 / len, s as f64))
        .collect();
    let baseline = [(0.0, 0.0), (1.0, 0.0)];

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&baseline),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&points),
    ];

    let title = format!(" Output ±{range:.2} ");
    let chart = Chart::new(datasets)
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(Axis::default().bounds([0.0, 1.0]))
        .y_axis(
            Axis::default()
                .bounds([-range, range])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
