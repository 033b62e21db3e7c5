//! Dot field simulation state.

use dotfield_core::{FieldSettings, SurfaceSize, Theme};
use glam::Vec2;

use crate::canvas::Canvas;
use crate::grid::Grid;
use crate::integrator::blend;
use crate::motion::synthesize;
use crate::render::{Breathing, render};

/// Pointer position meaning "no pointer"; far outside any influence radius.
pub const POINTER_SENTINEL: Vec2 = Vec2::new(-1.0e6, -1.0e6);

/// Frame clock advanced by a fixed step, independent of wall time.
///
/// Kept in `f64` so the step still registers after days of running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    time: f64,
}

impl Clock {
    /// Start the clock at `time`.
    pub fn starting_at(time: f64) -> Self {
        Self { time }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn advance(&mut self, step: f32) {
        self.time += f64::from(step);
    }
}

/// Everything one frame of the dot field reads and writes.
#[derive(Debug, Clone)]
pub struct FieldState {
    settings: FieldSettings,
    grid: Grid,
    clock: Clock,
    /// Surface-local pointer position.
    pointer: Vec2,
    /// Size the grid was built for.
    surface: SurfaceSize,
}

impl FieldState {
    /// Create a state with a grid tiling `surface`.
    pub fn new(settings: FieldSettings, surface: SurfaceSize) -> Self {
        Self {
            grid: Grid::build(surface.width, surface.height, settings.spacing),
            settings,
            clock: Clock::default(),
            pointer: POINTER_SENTINEL,
            surface,
        }
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Rebuild the grid for a new surface size. Point state is discarded.
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.grid = Grid::build(surface.width, surface.height, self.settings.spacing);
        self.surface = surface;
    }

    /// Store a pointer position already in surface-local coordinates.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    /// Forget the pointer.
    pub fn clear_pointer(&mut self) {
        self.pointer = POINTER_SENTINEL;
    }

    /// Advance the clock and move every point one step toward its target.
    pub fn update(&mut self) {
        self.clock.advance(self.settings.clock_step());
        let time = self.clock.time();
        let pointer = self.pointer;
        let settings = self.settings;

        for point in self.grid.points_mut() {
            let motion = synthesize(point.origin(), time, pointer, &settings);
            point.current = blend(point.current, motion.target, settings.damping);
            point.intensity = motion.intensity;
        }
    }

    /// Paint the current frame.
    pub fn render(&self, canvas: &mut impl Canvas, theme: Theme) {
        let breathing = Breathing::for_settings(self.clock.time(), &self.settings);
        render(
            canvas,
            &self.grid,
            self.pointer,
            theme,
            breathing,
            &self.settings,
        );
    }
}
