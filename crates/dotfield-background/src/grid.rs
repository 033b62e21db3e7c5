//! Dot grid model.

use glam::Vec2;

/// A single dot of the field.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Anchor assigned at build time.
    origin: Vec2,
    /// Smoothed position drawn on screen.
    pub current: Vec2,
    /// Normalized wave magnitude for the current frame.
    pub intensity: f32,
}

impl Point {
    /// Create a point resting at its origin.
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            current: origin,
            intensity: 0.0,
        }
    }

    /// Anchor position; never changes after construction.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}

/// Column-major grid of points tiling the surface.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cols: usize,
    rows: usize,
    spacing: f32,
    points: Vec<Point>,
}

impl Grid {
    /// Tile a `width × height` surface with one point every `spacing` units.
    ///
    /// An extra column and row are added so the field still reaches the far
    /// edges after rounding.
    ///
    /// Grids past [`MAX_POINTS`] are left empty rather than allocated.
    pub fn build(width: f32, height: f32, spacing: f32) -> Self {
        let cols = tile_count(width, spacing);
        let rows = tile_count(height, spacing);
        if cols.saturating_mul(rows) > MAX_POINTS {
            log::warn!(
                "refusing {cols}x{rows} dot grid for {width}x{height} surface at spacing {spacing}"
            );
            return Self {
                spacing,
                ..Self::default()
            };
        }

        let mut points = Vec::with_capacity(cols * rows);
        for col in 0..cols {
            for row in 0..rows {
                let origin = Vec2::new(col as f32 * spacing, row as f32 * spacing);
                points.push(Point::new(origin));
            }
        }

        log::debug!("built {cols}x{rows} dot grid for {width}x{height} surface");

        Self {
            cols,
            rows,
            spacing,
            points,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `(col, row)`, if in range.
    pub fn get(&self, col: usize, row: usize) -> Option<&Point> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.points.get(col * self.rows + row)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }
}

/// Upper bound on the number of points in one grid.
pub const MAX_POINTS: usize = 1 << 20;

/// Points along one axis, saturating at `MAX_POINTS + 1` for degenerate input.
fn tile_count(extent: f32, spacing: f32) -> usize {
    let tiles = (extent.max(0.0) / spacing).ceil();
    if spacing.is_nan() || spacing <= 0.0 || tiles.is_nan() || tiles >= MAX_POINTS as f32 {
        return MAX_POINTS + 1;
    }
    tiles as usize + 1
}
