//! Glyphs used to draw dots in terminal cells.

/// Dot glyphs from smallest to largest.
pub const DOT_CHARS: &[char] = &['·', '•', '●'];

/// Radius (surface units) at which each glyph after the first takes over.
const DOT_THRESHOLDS: [f32; 2] = [1.5, 2.8];

/// Glyph for a dot of the given radius.
pub fn dot_char(radius: f32) -> char {
    let idx = DOT_THRESHOLDS.iter().filter(|&&t| radius >= t).count();
    DOT_CHARS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_char() {
        assert_eq!(dot_char(0.8), '·');
        assert_eq!(dot_char(1.5), '•');
        assert_eq!(dot_char(2.0), '•');
        assert_eq!(dot_char(4.6), '●');
    }
}
