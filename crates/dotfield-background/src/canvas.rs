//! Drawing surface abstraction and the terminal cell canvas.

use dotfield_core::{CellMetrics, Rgb, Rgba, SurfaceSize, Theme};
use glam::Vec2;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::chars::dot_char;
use crate::color::Ink;

/// Cells fainter than this are left blank.
const MIN_VISIBLE_ALPHA: f32 = 0.02;

/// A 2D surface dots can be painted on.
pub trait Canvas {
    /// Extent of the surface in surface units.
    fn size(&self) -> SurfaceSize;

    /// Erase everything painted so far.
    fn clear(&mut self);

    /// Fill a circle with `paint`, scaled by `alpha`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, alpha: f32);
}

/// Linear gradient between two colors along `start -> end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub from: Rgb,
    pub to: Rgb,
}

impl LinearGradient {
    /// Gradient across the surface diagonal using the theme colors.
    pub fn diagonal(size: SurfaceSize, theme: Theme) -> Self {
        let (from, to) = theme.gradient();
        Self {
            start: Vec2::ZERO,
            end: Vec2::new(size.width, size.height),
            from,
            to,
        }
    }

    /// Color at `point`, projected onto the gradient axis and clamped.
    pub fn color_at(&self, point: Vec2) -> Rgb {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        if len_sq <= f32::EPSILON {
            return self.from;
        }
        let t = (point - self.start).dot(axis) / len_sq;
        self.from.lerp(self.to, t)
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Gradient(LinearGradient),
}

impl Paint {
    /// Color and alpha factor at `point`.
    pub fn sample(&self, point: Vec2) -> (Rgb, f32) {
        match self {
            Paint::Solid(rgba) => (rgba.rgb, rgba.alpha),
            Paint::Gradient(gradient) => (gradient.color_at(point), 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CellInk {
    ink: Ink,
    /// Largest radius painted into the cell this frame.
    radius: f32,
}

/// Canvas backed by a grid of terminal cells.
///
/// Each cell covers `cell_width × cell_height` surface units and keeps the
/// composited color of every circle that touches it.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    metrics: CellMetrics,
    cells: Vec<CellInk>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, metrics: CellMetrics) -> Self {
        Self {
            cols,
            rows,
            metrics,
            cells: vec![CellInk::default(); cols as usize * rows as usize],
        }
    }

    /// Match a new terminal size; drops everything painted.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![CellInk::default(); cols as usize * rows as usize];
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Accumulated ink at `(col, row)`.
    pub fn ink(&self, col: u16, row: u16) -> Option<Ink> {
        self.index(col, row).map(|i| self.cells[i].ink)
    }

    /// Widget drawing the canvas for `theme`.
    pub fn view(&self, theme: Theme) -> CanvasView<'_> {
        CanvasView {
            canvas: self,
            theme,
        }
    }

    /// Glyph and foreground for a visible cell, flattened over `backdrop`.
    fn glyph(&self, col: u16, row: u16, backdrop: Rgb) -> Option<(char, Color)> {
        let cell = self.index(col, row).map(|i| self.cells[i])?;
        if cell.ink.alpha < MIN_VISIBLE_ALPHA {
            return None;
        }
        Some((dot_char(cell.radius), cell.ink.flatten(backdrop).color()))
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows).then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Cell range touched by `[lo, hi]` along one axis, clipped to `0..count`.
    fn span(lo: f32, hi: f32, unit: f32, count: u16) -> Option<(u16, u16)> {
        let first = (lo / unit).floor();
        let last = (hi / unit).floor();
        if count == 0 || last < 0.0 || first >= count as f32 || first.is_nan() || last.is_nan() {
            return None;
        }
        let first = first.max(0.0) as u16;
        let last = last.min(count as f32 - 1.0) as u16;
        Some((first, last))
    }
}

/// Draws a [`CellCanvas`] into a buffer. Cells without a visible dot are
/// left as they are.
#[derive(Debug, Clone, Copy)]
pub struct CanvasView<'a> {
    canvas: &'a CellCanvas,
    theme: Theme,
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let backdrop = self.theme.backdrop();
        let cols = self.canvas.cols.min(area.width);
        let rows = self.canvas.rows.min(area.height);
        for row in 0..rows {
            for col in 0..cols {
                let Some((symbol, color)) = self.canvas.glyph(col, row, backdrop) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char(symbol).set_fg(color);
                }
            }
        }
    }
}

impl Canvas for CellCanvas {
    fn size(&self) -> SurfaceSize {
        self.metrics.surface_size(self.cols, self.rows)
    }

    fn clear(&mut self) {
        self.cells.fill(CellInk::default());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, alpha: f32) {
        if alpha <= 0.0 || radius <= 0.0 {
            return;
        }

        let cw = self.metrics.cell_width;
        let ch = self.metrics.cell_height;
        let Some((col_lo, col_hi)) = Self::span(center.x - radius, center.x + radius, cw, self.cols)
        else {
            return;
        };
        let Some((row_lo, row_hi)) = Self::span(center.y - radius, center.y + radius, ch, self.rows)
        else {
            return;
        };

        let (color, paint_alpha) = paint.sample(center);
        let alpha = alpha * paint_alpha;

        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                let cell_min = Vec2::new(col as f32 * cw, row as f32 * ch);
                let cell_max = cell_min + Vec2::new(cw, ch);
                let holds_center = center.cmpge(cell_min).all() && center.cmplt(cell_max).all();
                let cell_center = (cell_min + cell_max) * 0.5;
                if !holds_center && center.distance(cell_center) > radius {
                    continue;
                }

                let idx = row as usize * self.cols as usize + col as usize;
                let cell = &mut self.cells[idx];
                cell.ink = cell.ink.over(color, alpha);
                cell.radius = cell.radius.max(radius);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Cell;

    fn canvas() -> CellCanvas {
        CellCanvas::new(8, 4, CellMetrics::default())
    }

    #[test]
    fn test_size_in_surface_units() {
        assert_eq!(canvas().size(), SurfaceSize::new(80.0, 80.0));
    }

    #[test]
    fn test_gradient_endpoints() {
        let gradient = LinearGradient::diagonal(SurfaceSize::new(800.0, 600.0), Theme::Dark);
        let (from, to) = Theme::Dark.gradient();
        assert_eq!(gradient.color_at(Vec2::ZERO), from);
        assert_eq!(gradient.color_at(Vec2::new(800.0, 600.0)), to);
        assert_eq!(gradient.color_at(Vec2::new(-50.0, -50.0)), from);
        assert_eq!(gradient.color_at(Vec2::new(2000.0, 2000.0)), to);

        let degenerate = LinearGradient::diagonal(SurfaceSize::default(), Theme::Light);
        assert_eq!(degenerate.color_at(Vec2::new(3.0, 3.0)), Theme::Light.gradient().0);
    }

    #[test]
    fn test_small_circle_marks_its_cell() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 1.0));
        canvas.fill_circle(Vec2::new(25.0, 30.0), 1.2, &paint, 0.5);

        let ink = canvas.ink(2, 1).unwrap();
        assert_eq!(ink.alpha, 0.5);
        assert_eq!(canvas.ink(1, 1).unwrap().alpha, 0.0);
        assert_eq!(canvas.ink(2, 0).unwrap().alpha, 0.0);
    }

    #[test]
    fn test_solid_paint_alpha_multiplies() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 0.15));
        canvas.fill_circle(Vec2::new(5.0, 5.0), 1.0, &paint, 0.5);
        assert!((canvas.ink(0, 0).unwrap().alpha - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_large_circle_spreads() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 1.0));
        canvas.fill_circle(Vec2::new(40.0, 40.0), 12.0, &paint, 1.0);
        // Cells whose centers lie within 12 units: (3,1) (4,1) (3,2) (4,2)
        for (col, row) in [(3, 1), (4, 1), (3, 2), (4, 2)] {
            assert_eq!(canvas.ink(col, row).unwrap().alpha, 1.0);
        }
        assert_eq!(canvas.ink(2, 1).unwrap().alpha, 0.0);
    }

    #[test]
    fn test_offscreen_circles_are_clipped() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 1.0));
        canvas.fill_circle(Vec2::new(-30.0, 10.0), 2.0, &paint, 1.0);
        canvas.fill_circle(Vec2::new(10.0, 500.0), 2.0, &paint, 1.0);
        canvas.fill_circle(Vec2::splat(f32::NAN), 2.0, &paint, 1.0);
        assert!(canvas.cells.iter().all(|c| c.ink.alpha == 0.0));
    }

    #[test]
    fn test_clear_and_resize() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 1.0));
        canvas.fill_circle(Vec2::new(5.0, 5.0), 1.0, &paint, 1.0);
        canvas.clear();
        assert_eq!(canvas.ink(0, 0).unwrap(), Ink::default());

        canvas.resize(3, 2);
        assert_eq!(canvas.cells.len(), 6);
        assert!(canvas.ink(3, 0).is_none());
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_view_draws_visible_dots_only() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 1.0));
        canvas.fill_circle(Vec2::new(15.0, 10.0), 1.0, &paint, 1.0);
        canvas.fill_circle(Vec2::new(35.0, 10.0), 4.0, &paint, 0.5);
        canvas.fill_circle(Vec2::new(55.0, 10.0), 2.0, &paint, 0.01);

        let area = Rect::new(0, 0, 8, 4);
        let mut buf = Buffer::filled(area, Cell::new("x"));
        canvas.view(Theme::Dark).render(area, &mut buf);

        // The faint dot at column 5 leaves what was underneath
        assert_eq!(row_text(&buf, 0), "x·x●xxxx");
        assert_eq!(row_text(&buf, 1), "xxxxxxxx");
        assert_eq!(buf[(1, 0)].fg, Rgb::WHITE.color());
        assert_eq!(buf[(3, 0)].fg, Rgb::new(128, 128, 128).color());
        assert_eq!(buf[(5, 0)].fg, Color::Reset);
    }

    #[test]
    fn test_view_respects_area() {
        let mut canvas = canvas();
        let paint = Paint::Solid(Rgba::new(Rgb::WHITE, 1.0));
        canvas.fill_circle(Vec2::new(5.0, 10.0), 1.0, &paint, 1.0);
        canvas.fill_circle(Vec2::new(75.0, 70.0), 1.0, &paint, 1.0);

        // Offset and smaller than the canvas
        let area = Rect::new(2, 1, 4, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 4));
        canvas.view(Theme::Light).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].symbol(), "·");
        assert_eq!(row_text(&buf, 0), "        ");
        assert_eq!(row_text(&buf, 3), "        ");
    }
}
