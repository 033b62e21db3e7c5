//! Core types shared by the dotfield crates.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Construct a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Linear interpolation between two colors, `t` clamped to 0..=1.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Channels as floats in 0.0..=1.0.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Build a color from floats in 0.0..=1.0.
    pub fn from_unit(channels: [f32; 3]) -> Rgb {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(to_u8(channels[0]), to_u8(channels[1]), to_u8(channels[2]))
    }

    /// Convert to a Ratatui color.
    pub fn color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// A color with a straight (non-premultiplied) alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(rgb: Rgb, alpha: f32) -> Self {
        Self { rgb, alpha }
    }
}

/// Color theme supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Switch between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Gradient endpoints, top-left to bottom-right.
    pub fn gradient(self) -> (Rgb, Rgb) {
        match self {
            // blue-300 -> purple-400
            Theme::Dark => (Rgb::hex(0x93c5fd), Rgb::hex(0xc084fc)),
            // blue-600 -> purple-800
            Theme::Light => (Rgb::hex(0x2563eb), Rgb::hex(0x6b21a8)),
        }
    }

    /// Flat color for dots with little wave energy.
    pub fn base_dot(self) -> Rgba {
        match self {
            Theme::Dark => Rgba::new(Rgb::WHITE, 0.15),
            Theme::Light => Rgba::new(Rgb::BLACK, 0.12),
        }
    }

    /// Color the surface is assumed to sit on.
    pub fn backdrop(self) -> Rgb {
        match self {
            Theme::Dark => Rgb::BLACK,
            Theme::Light => Rgb::WHITE,
        }
    }

    /// Accent used for UI text drawn over the field.
    pub fn accent(self) -> Color {
        self.gradient().0.color()
    }
}

/// Whether the pointer pulls dots in or pushes them away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPolicy {
    #[default]
    Attract,
    Repel,
}

impl PointerPolicy {
    /// Sign applied to the origin-to-pointer direction.
    pub fn sign(self) -> f32 {
        match self {
            PointerPolicy::Attract => 1.0,
            PointerPolicy::Repel => -1.0,
        }
    }
}

/// Falloff applied to the normalized pointer force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EaseCurve {
    Linear,
    EaseOutQuad,
    #[default]
    EaseOutCubic,
}

impl EaseCurve {
    /// Evaluate the curve at `f`, clamped to 0..=1.
    pub fn apply(self, f: f32) -> f32 {
        let f = f.clamp(0.0, 1.0);
        match self {
            EaseCurve::Linear => f,
            EaseCurve::EaseOutQuad => 1.0 - (1.0 - f).powi(2),
            EaseCurve::EaseOutCubic => 1.0 - (1.0 - f).powi(3),
        }
    }
}

/// Perpendicular motion added near the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwirlStyle {
    Off,
    /// Oscillates at twice the clock rate.
    #[default]
    Orbital,
    /// Oscillates with the clock.
    Plain,
}

impl SwirlStyle {
    /// Oscillation factor at `time`, in -1..=1.
    pub fn oscillation(self, time: f64) -> f32 {
        match self {
            SwirlStyle::Off => 0.0,
            SwirlStyle::Orbital => (time * 2.0).sin() as f32,
            SwirlStyle::Plain => time.sin() as f32,
        }
    }
}

/// Tunables of the dot field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSettings {
    /// Clock advance per frame before scaling.
    pub time_step: f32,
    /// Multiplier on `time_step`.
    pub wave_speed_scale: f32,
    /// Smoothing factor toward the target, 0..=1.
    pub damping: f32,
    pub pointer_policy: PointerPolicy,
    pub ease_curve: EaseCurve,
    pub swirl: SwirlStyle,
    /// Peak swirl displacement in surface units.
    pub swirl_strength: f32,
    /// Global size/opacity pulse.
    pub breathing: bool,
    /// Distance between grid origins in surface units.
    pub spacing: f32,
    pub influence_radius: f32,
    /// Peak pull (or push) displacement in surface units.
    pub pull_strength: f32,
    /// Cap on the total pointer displacement.
    pub max_displacement: f32,
}

impl FieldSettings {
    /// Clock advance per frame.
    pub fn clock_step(&self) -> f32 {
        self.time_step * self.wave_speed_scale
    }
}

impl Default for FieldSettings {
    fn default() -> Self {
        Profile::default().settings()
    }
}

/// Named presets for [`FieldSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Calm waves, breathing, magnetic pull with orbital swirl.
    #[default]
    Drift,
    /// Faster waves, no breathing, dots pushed away from the pointer.
    Ripple,
}

impl Profile {
    /// Cycle to the next profile.
    pub fn next(self) -> Self {
        match self {
            Profile::Drift => Profile::Ripple,
            Profile::Ripple => Profile::Drift,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Profile::Drift => "drift",
            Profile::Ripple => "ripple",
        }
    }

    /// Settings for this profile.
    pub fn settings(self) -> FieldSettings {
        match self {
            Profile::Drift => FieldSettings {
                time_step: 0.015,
                wave_speed_scale: 1.0,
                damping: 0.1,
                pointer_policy: PointerPolicy::Attract,
                ease_curve: EaseCurve::EaseOutCubic,
                swirl: SwirlStyle::Orbital,
                swirl_strength: 8.0,
                breathing: true,
                spacing: 40.0,
                influence_radius: 200.0,
                pull_strength: 30.0,
                max_displacement: 40.0,
            },
            Profile::Ripple => FieldSettings {
                time_step: 0.015,
                wave_speed_scale: 2.0,
                damping: 0.1,
                pointer_policy: PointerPolicy::Repel,
                ease_curve: EaseCurve::EaseOutCubic,
                swirl: SwirlStyle::Plain,
                swirl_strength: 6.0,
                breathing: false,
                spacing: 40.0,
                influence_radius: 150.0,
                pull_strength: 40.0,
                max_displacement: 40.0,
            },
        }
    }
}

/// Size of the drawing surface in surface units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Surface units covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 10.0,
            cell_height: 20.0,
        }
    }
}

impl CellMetrics {
    /// Surface size for a terminal of `cols × rows` cells.
    pub fn surface_size(&self, cols: u16, rows: u16) -> SurfaceSize {
        SurfaceSize::new(
            cols as f32 * self.cell_width,
            rows as f32 * self.cell_height,
        )
    }

    /// Center of cell `(col, row)` in surface units.
    pub fn cell_center(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.cell_width,
            (row as f32 + 0.5) * self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_theme_palette() {
        assert_eq!(Theme::Dark.gradient().0, Rgb::new(0x93, 0xc5, 0xfd));
        assert_eq!(Theme::Light.gradient().1, Rgb::new(0x6b, 0x21, 0xa8));
        assert_eq!(Theme::Dark.base_dot().alpha, 0.15);
        assert_eq!(Theme::Light.base_dot().rgb, Rgb::BLACK);
    }

    #[test]
    fn test_ease_curves() {
        for curve in [EaseCurve::Linear, EaseCurve::EaseOutQuad, EaseCurve::EaseOutCubic] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
            assert_eq!(curve.apply(2.0), 1.0);
        }
        assert!((EaseCurve::EaseOutCubic.apply(0.5) - 0.875).abs() < 1e-6);
        assert!((EaseCurve::EaseOutQuad.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_rgb_lerp() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(100, 200, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(50, 150, 100));
        assert_eq!(a.lerp(b, -3.0), a);
    }

    #[test]
    fn test_profiles() {
        let drift = Profile::Drift.settings();
        assert!(drift.breathing);
        assert_eq!(drift.pointer_policy, PointerPolicy::Attract);
        assert_eq!(drift.swirl, SwirlStyle::Orbital);
        assert_eq!(drift.clock_step(), 0.015);

        let ripple = Profile::Ripple.settings();
        assert!(!ripple.breathing);
        assert_eq!(ripple.pointer_policy, PointerPolicy::Repel);
        assert_eq!(ripple.clock_step(), 0.03);

        assert_eq!(Profile::Drift.next().next(), Profile::Drift);
        assert_eq!(FieldSettings::default(), drift);
    }

    #[test]
    fn test_swirl_oscillation() {
        assert_eq!(SwirlStyle::Off.oscillation(1.3), 0.0);
        assert_eq!(SwirlStyle::Orbital.oscillation(0.0), 0.0);
        assert!((SwirlStyle::Plain.oscillation(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cell_metrics() {
        let metrics = CellMetrics::default();
        assert_eq!(metrics.surface_size(80, 30), SurfaceSize::new(800.0, 600.0));
        assert_eq!(metrics.cell_center(0, 0), (5.0, 10.0));
    }
}
