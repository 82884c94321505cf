//! Meditation drone.
//!
//! A single 110 Hz sine (A2) kept very quiet, its level breathing between
//! 0.06 and 0.18 on the same 0.08 Hz cycle as the ocean swell. No noise.

use crate::graph::{
    extensions::NodeExt,
    gain::{GainNode, GainParam},
    lfo::LfoNode,
    oscillator::OscNode,
    GraphNode,
};

pub const DRONE_HZ: f32 = 110.0;

pub fn meditation(sample_rate: f32) -> impl GraphNode {
    let breath = GainNode::new(0.12)
        .with_smoothing_ms(20.0, sample_rate)
        .modulate(LfoNode::sine(0.08), GainParam::Level, 0.06);

    OscNode::sine(DRONE_HZ).through(breath)
}
