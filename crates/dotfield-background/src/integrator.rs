//! Exponential smoothing of dot positions.

use glam::Vec2;

/// Move `current` a fraction `damping` of the way toward `target`.
///
/// With `damping` in `(0, 1]` each axis approaches the target monotonically
/// and never passes it.
pub fn blend(current: Vec2, target: Vec2, damping: f32) -> Vec2 {
    current + (target - current) * damping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_step() {
        let next = blend(Vec2::ZERO, Vec2::new(10.0, -20.0), 0.1);
        assert!((next - Vec2::new(1.0, -2.0)).length() < 1e-6);
        assert_eq!(blend(Vec2::ONE, Vec2::ONE, 0.1), Vec2::ONE);
    }

    #[test]
    fn test_converges_monotonically_without_overshoot() {
        let target = Vec2::new(100.0, -40.0);
        let mut current = Vec2::new(-25.0, 60.0);
        let mut last_gap = (target - current).abs();

        for _ in 0..500 {
            let next = blend(current, target, 0.1);
            // x climbs toward 100, y falls toward -40
            assert!(next.x >= current.x && next.x <= target.x);
            assert!(next.y <= current.y && next.y >= target.y);

            let gap = (target - next).abs();
            assert!(gap.x <= last_gap.x && gap.y <= last_gap.y);
            last_gap = gap;
            current = next;
        }
        assert!((target - current).length() < 1e-3);
    }
}
