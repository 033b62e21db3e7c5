//! Two-pass dot renderer.
//!
//! Every frame clears the canvas, draws every dot (base pass) and then
//! redraws the dots near the pointer larger and brighter (highlight pass),
//! so highlights always land on top.

use dotfield_core::{FieldSettings, Theme};
use glam::Vec2;

use crate::canvas::{Canvas, LinearGradient, Paint};
use crate::grid::Grid;

/// Angular frequency of the breathing pulse.
const BREATHING_RATE: f64 = 0.8;

/// Base dot radius before wave growth.
const BASE_RADIUS: f32 = 1.2;
/// Highlight dot radius before wave growth.
const HIGHLIGHT_RADIUS: f32 = 2.5;
/// Radius added per unit of intensity.
const RADIUS_PER_INTENSITY: f32 = 1.5;

/// Intensity above which base dots switch from the flat color to the gradient.
const GRADIENT_THRESHOLD: f32 = 0.1;

/// Global size and opacity pulse shared by every dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breathing {
    /// Pulse position in 0..=1.
    pub phase: f32,
}

impl Breathing {
    /// Fixed at full size and opacity.
    pub const STILL: Breathing = Breathing { phase: 1.0 };

    /// Pulse at `time`.
    pub fn at(time: f64) -> Self {
        Self {
            phase: breathing_phase(time),
        }
    }

    /// Pulse at `time`, or [`Breathing::STILL`] when disabled.
    pub fn for_settings(time: f64, settings: &FieldSettings) -> Self {
        if settings.breathing {
            Self::at(time)
        } else {
            Self::STILL
        }
    }

    /// Size multiplier, 0.7..=1.0.
    pub fn scale(self) -> f32 {
        0.7 + self.phase * 0.3
    }

    /// Opacity multiplier, 0.85..=1.0.
    pub fn opacity(self) -> f32 {
        0.85 + self.phase * 0.15
    }
}

/// Slow sinusoid in 0..=1 with period `2π / 0.8`.
pub fn breathing_phase(time: f64) -> f32 {
    ((time * BREATHING_RATE).sin() * 0.5 + 0.5).clamp(0.0, 1.0) as f32
}

/// Paint the grid onto `canvas`.
pub fn render(
    canvas: &mut impl Canvas,
    grid: &Grid,
    pointer: Vec2,
    theme: Theme,
    breathing: Breathing,
    settings: &FieldSettings,
) {
    canvas.clear();

    let gradient = Paint::Gradient(LinearGradient::diagonal(canvas.size(), theme));
    let base_color = Paint::Solid(theme.base_dot());
    let scale = breathing.scale();
    let opacity = breathing.opacity();

    for point in grid.points() {
        let intensity = point.intensity;
        let radius = (BASE_RADIUS + intensity * RADIUS_PER_INTENSITY) * scale;
        if intensity > GRADIENT_THRESHOLD {
            let alpha = (0.15 + intensity * 0.3) * opacity;
            canvas.fill_circle(point.current, radius, &gradient, alpha);
        } else {
            canvas.fill_circle(point.current, radius, &base_color, opacity);
        }
    }

    let influence_radius = settings.influence_radius;
    for point in grid.points() {
        let distance = point.current.distance(pointer);
        if distance >= influence_radius {
            continue;
        }
        let alpha = (1.0 - distance / influence_radius) * opacity;
        let radius = (HIGHLIGHT_RADIUS + point.intensity * RADIUS_PER_INTENSITY) * scale;
        canvas.fill_circle(point.current, radius, &gradient, alpha);
    }
}
