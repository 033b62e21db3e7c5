//! Motion synthesis: ambient waves plus pointer influence.
//!
//! Everything here is a pure function of origin, clock and pointer, so a
//! frame can be replayed exactly from those three inputs.

use dotfield_core::FieldSettings;
use glam::Vec2;

/// Divisor mapping wave magnitude to intensity.
pub const INTENSITY_SCALE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trig {
    Sin,
    Cos,
}

/// One sinusoid of the ambient wave:
/// `trig(t·time + kx·x + ky·y) · amplitude`, added to `axis`.
#[derive(Debug, Clone, Copy)]
struct WaveTerm {
    axis: Axis,
    trig: Trig,
    time: f32,
    kx: f32,
    ky: f32,
    amplitude: f32,
}

impl WaveTerm {
    const fn new(axis: Axis, trig: Trig, time: f32, kx: f32, ky: f32, amplitude: f32) -> Self {
        Self {
            axis,
            trig,
            time,
            kx,
            ky,
            amplitude,
        }
    }

    fn eval(&self, origin: Vec2, time: f64) -> f32 {
        let phase = time * f64::from(self.time) + f64::from(origin.x * self.kx + origin.y * self.ky);
        let wave = match self.trig {
            Trig::Sin => phase.sin(),
            Trig::Cos => phase.cos(),
        };
        wave as f32 * self.amplitude
    }
}

/// Layered sinusoids; distinct frequencies keep the field from looking periodic.
const WAVE_TERMS: [WaveTerm; 6] = [
    WaveTerm::new(Axis::X, Trig::Sin, 0.4, 0.015, 0.01, 8.0),
    WaveTerm::new(Axis::Y, Trig::Cos, 0.6, -0.008, 0.02, 6.0),
    WaveTerm::new(Axis::X, Trig::Sin, 0.25, 0.012, 0.012, 10.0),
    WaveTerm::new(Axis::Y, Trig::Cos, 0.75, -0.018, 0.015, 5.0),
    WaveTerm::new(Axis::X, Trig::Sin, 0.15, 0.0, 0.025, 4.0),
    WaveTerm::new(Axis::Y, Trig::Cos, 0.2, 0.02, 0.0, 7.0),
];

/// Output of [`synthesize`] for one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub target: Vec2,
    pub intensity: f32,
}

/// Pointer-independent displacement at `origin`.
pub fn ambient_wave(origin: Vec2, time: f64) -> Vec2 {
    WAVE_TERMS.iter().fold(Vec2::ZERO, |acc, term| {
        let value = term.eval(origin, time);
        match term.axis {
            Axis::X => acc + Vec2::new(value, 0.0),
            Axis::Y => acc + Vec2::new(0.0, value),
        }
    })
}

/// Eased pointer force at `distance`; zero at or beyond the influence radius.
pub fn pointer_ease(distance: f32, settings: &FieldSettings) -> f32 {
    let radius = settings.influence_radius;
    if distance >= radius {
        return 0.0;
    }
    let force = (radius - distance) / radius;
    settings.ease_curve.apply(force)
}

/// Displacement caused by the pointer on a point anchored at `origin`.
pub fn pointer_influence(origin: Vec2, pointer: Vec2, time: f64, settings: &FieldSettings) -> Vec2 {
    let delta = pointer - origin;
    let ease = pointer_ease(delta.length(), settings);
    if ease == 0.0 {
        return Vec2::ZERO;
    }

    // atan2(0, 0) is 0, so a pointer sitting on the origin pulls along +x.
    let direction = Vec2::from_angle(delta.y.atan2(delta.x));
    let pull = direction * (ease * settings.pull_strength * settings.pointer_policy.sign());
    let swirl = direction.perp() * (ease * settings.swirl_strength * settings.swirl.oscillation(time));

    (pull + swirl).clamp_length_max(settings.max_displacement)
}

/// Target position and intensity for a point anchored at `origin`.
pub fn synthesize(origin: Vec2, time: f64, pointer: Vec2, settings: &FieldSettings) -> Motion {
    let wave = ambient_wave(origin, time);
    let intensity = wave.length() / INTENSITY_SCALE;
    let target = origin + wave + pointer_influence(origin, pointer, time, settings);
    Motion { target, intensity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::state::POINTER_SENTINEL;
    use dotfield_core::{PointerPolicy, Profile, SwirlStyle};

    fn settings() -> FieldSettings {
        Profile::Drift.settings()
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let s = settings();
        let origin = Vec2::new(120.0, 360.0);
        let pointer = Vec2::new(150.0, 300.0);
        for time in [0.0, 0.015, 3.7, 1234.5] {
            let a = synthesize(origin, time, pointer, &s);
            let b = synthesize(origin, time, pointer, &s);
            assert_eq!(a.target.x.to_bits(), b.target.x.to_bits());
            assert_eq!(a.target.y.to_bits(), b.target.y.to_bits());
            assert_eq!(a.intensity.to_bits(), b.intensity.to_bits());
        }
    }

    #[test]
    fn test_wave_still_moves_at_large_times() {
        let origin = Vec2::new(120.0, 360.0);
        let time = 262_144.0;
        let now = ambient_wave(origin, time);
        let next = ambient_wave(origin, time + f64::from(0.015f32));
        assert_ne!(now, next);
        assert!((next - now).length() < 1.0);
    }

    #[test]
    fn test_sentinel_pointer_has_no_influence() {
        let s = settings();
        let grid = Grid::build(1920.0, 1080.0, s.spacing);
        for point in grid.points() {
            for time in [0.0, 2.5, 99.0] {
                assert_eq!(
                    pointer_influence(point.origin(), POINTER_SENTINEL, time, &s),
                    Vec2::ZERO
                );
            }
        }
    }

    #[test]
    fn test_wave_at_time_zero() {
        let s = settings();
        let grid = Grid::build(800.0, 600.0, 40.0);
        assert_eq!((grid.cols(), grid.rows()), (21, 16));

        // Origin: every sine term vanishes, every cosine term is at its peak.
        let motion = synthesize(Vec2::ZERO, 0.0, POINTER_SENTINEL, &s);
        assert_eq!(motion.target, Vec2::new(0.0, 18.0));
        assert!((motion.intensity - 0.9).abs() < 1e-6);

        for point in grid.points() {
            let Vec2 { x, y } = point.origin();
            let wave_x = (x * 0.015 + y * 0.01).sin() * 8.0
                + ((x + y) * 0.012).sin() * 10.0
                + (y * 0.025).sin() * 4.0;
            let wave_y = (y * 0.02 - x * 0.008).cos() * 6.0
                + (-x * 0.018 + y * 0.015).cos() * 5.0
                + (x * 0.02).cos() * 7.0;
            let motion = synthesize(point.origin(), 0.0, POINTER_SENTINEL, &s);
            let expected = point.origin() + Vec2::new(wave_x, wave_y);
            assert!((motion.target - expected).length() < 1e-3, "{:?}", point);
        }
    }

    #[test]
    fn test_pointer_on_origin_saturates() {
        let s = settings();
        let origin = Vec2::new(200.0, 120.0);
        assert_eq!(pointer_ease(0.0, &s), 1.0);

        let influence = pointer_influence(origin, origin, 0.0, &s);
        assert!((influence.length() - s.pull_strength).abs() < 1e-4);
        assert!(influence.x > 0.0);
        assert!(influence.y.abs() < 1e-4);
    }

    #[test]
    fn test_influence_boundary() {
        let s = settings();
        assert_eq!(pointer_ease(s.influence_radius, &s), 0.0);
        assert_eq!(pointer_ease(s.influence_radius + 1.0, &s), 0.0);
        assert!(pointer_ease(s.influence_radius - 1.0, &s) > 0.0);

        let origin = Vec2::ZERO;
        let pointer = Vec2::new(s.influence_radius, 0.0);
        assert_eq!(pointer_influence(origin, pointer, 1.0, &s), Vec2::ZERO);
    }

    #[test]
    fn test_attract_and_repel() {
        let mut s = settings();
        s.swirl = SwirlStyle::Off;
        let origin = Vec2::new(100.0, 100.0);
        let pointer = Vec2::new(150.0, 100.0);

        let pulled = pointer_influence(origin, pointer, 0.5, &s);
        assert!(pulled.x > 0.0);
        assert!(pulled.y.abs() < 1e-4);

        s.pointer_policy = PointerPolicy::Repel;
        let pushed = pointer_influence(origin, pointer, 0.5, &s);
        assert!((pushed + pulled).length() < 1e-4);
    }

    #[test]
    fn test_swirl_is_perpendicular() {
        let mut s = settings();
        s.pull_strength = 0.0;
        let origin = Vec2::ZERO;
        let pointer = Vec2::new(0.0, 50.0);
        let time = std::f64::consts::FRAC_PI_4; // sin(2t) = 1

        let swirl = pointer_influence(origin, pointer, time, &s);
        assert!(swirl.y.abs() < 1e-4);
        let expected = s.ease_curve.apply(0.75) * s.swirl_strength;
        assert!((swirl.length() - expected).abs() < 1e-3);
    }

    #[test]
    fn test_influence_is_capped() {
        let mut s = settings();
        s.pull_strength = 500.0;
        s.max_displacement = 12.0;
        let influence = pointer_influence(Vec2::ZERO, Vec2::new(5.0, 5.0), 1.0, &s);
        assert!(influence.length() <= 12.0 + 1e-4);
    }
}
