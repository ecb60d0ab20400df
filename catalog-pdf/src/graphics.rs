/// RGB color for fill and stroke operations, components 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);
    pub const WHITE: Color = Color::gray(1.0);

    /// Color from components in 0.0 to 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b }
    }

    /// Equal components: 0.0 is black, 1.0 is white.
    pub const fn gray(level: f64) -> Self {
        Color {
            r: level,
            g: level,
            b: level,
        }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub fn hex(rgb: u32) -> Self {
        Color {
            r: ((rgb >> 16) & 0xff) as f64 / 255.0,
            g: ((rgb >> 8) & 0xff) as f64 / 255.0,
            b: (rgb & 0xff) as f64 / 255.0,
        }
    }
}

/// Axis-aligned rectangle in PDF user space: `(x, y)` is the
/// bottom-left corner and y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle with bottom-left corner at (x, y).
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by `by` on every side.
    pub fn inset(&self, by: f64) -> Rect {
        Rect {
            x: self.x + by,
            y: self.y + by,
            width: self.width - 2.0 * by,
            height: self.height - 2.0 * by,
        }
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Y coordinate of the top edge.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_components() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(c.b, 0.0);
        assert_eq!(Color::hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn inset_shrinks_symmetrically() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0).inset(5.0);
        assert_eq!(r, Rect::new(15.0, 25.0, 90.0, 40.0));
        assert_eq!(r.center_x(), 60.0);
        assert_eq!(r.top(), 65.0);
    }
}
