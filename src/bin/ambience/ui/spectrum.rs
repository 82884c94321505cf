//! Spectrum of the post-master output.
//!
//! Ambient beds are all about spectral shape (pink vs white, the rain band,
//! the ocean's low hump), so bins are log-spaced and each band averages
//! every FFT bin it covers. Readings decay rather than jump so the display
//! settles on the long-run shape instead of flickering with the noise.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const BANDS: usize = 48;
const MIN_FREQ: f32 = 20.0;
const FLOOR_DB: f64 = -100.0;
/// Weight of the newest frame in the running average.
const SMOOTHING: f64 = 0.25;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    /// FFT bin range [start, end) per band
    bands: Vec<(usize, usize)>,
    /// (log10 Hz, dB) per band
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_len: usize, sample_rate: f32) -> Self {
        let fft_len = fft_len.max(2);
        let fft = FftPlanner::new().plan_fft_forward(fft_len);

        // Hann
        let denom = (fft_len - 1) as f32;
        let window = (0..fft_len)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let half = fft_len / 2;
        let bin_hz = sample_rate / fft_len as f32;
        let max_freq = (sample_rate / 2.0).min(20_000.0).max(MIN_FREQ * 2.0);
        let ratio = max_freq / MIN_FREQ;

        let mut bands = Vec::with_capacity(BANDS);
        let mut spectrum = Vec::with_capacity(BANDS);
        for i in 0..BANDS {
            let lo = MIN_FREQ * ratio.powf(i as f32 / BANDS as f32);
            let hi = MIN_FREQ * ratio.powf((i + 1) as f32 / BANDS as f32);
            let start = ((lo / bin_hz) as usize).clamp(1, half - 1);
            let end = ((hi / bin_hz).ceil() as usize).clamp(start + 1, half);
            bands.push((start, end));
            spectrum.push((((lo * hi).sqrt() as f64).log10(), FLOOR_DB));
        }

        Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); fft_len],
            bands,
            spectrum,
        }
    }

    /// Fold in a new frame. Frames of the wrong length are ignored.
    pub fn update(&mut self, samples: &[f32]) {
        if samples.len() != self.window.len() {
            return;
        }

        for ((bin, &s), &w) in self.scratch.iter_mut().zip(samples).zip(&self.window) {
            *bin = Complex::new(s * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let norm = self.window.len() as f32;
        for (&(start, end), (_, db)) in self.bands.iter().zip(self.spectrum.iter_mut()) {
            let power = self.scratch[start..end]
                .iter()
                .map(|c| (c.norm_sqr() / norm) as f64)
                .sum::<f64>()
                / (end - start) as f64;
            let fresh = (10.0 * power.max(1e-12).log10()).max(FLOOR_DB);
            *db += SMOOTHING * (fresh - *db);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let top = spectrum
        .iter()
        .map(|&(_, db)| db)
        .fold(FLOOR_DB + 40.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(" Spectrum ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([(MIN_FREQ as f64).log10(), 20_000f64.log10()])
                .labels(["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, top + 6.0])
                .labels(["-100", "-60", "-20"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
