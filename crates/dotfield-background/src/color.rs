//! Color compositing helpers for the cell canvas.

use dotfield_core::Rgb;

/// Accumulated ink in one canvas cell, straight alpha.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ink {
    pub color: [f32; 3],
    pub alpha: f32,
}

impl Ink {
    /// Composite `color` at `alpha` over this ink (source-over).
    pub fn over(self, color: Rgb, alpha: f32) -> Ink {
        let src_alpha = alpha.clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return self;
        }

        let src = color.to_unit();
        let dst_weight = self.alpha * (1.0 - src_alpha);
        let out_alpha = src_alpha + dst_weight;

        let mut out = [0.0; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            *channel = (src[i] * src_alpha + self.color[i] * dst_weight) / out_alpha;
        }

        Ink {
            color: out,
            alpha: out_alpha,
        }
    }

    /// Flatten onto an opaque backdrop.
    pub fn flatten(self, backdrop: Rgb) -> Rgb {
        let base = backdrop.to_unit();
        let mut out = [0.0; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            *channel = self.color[i] * self.alpha + base[i] * (1.0 - self.alpha);
        }
        Rgb::from_unit(out)
    }
}
