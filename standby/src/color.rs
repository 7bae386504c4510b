use crossterm::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Rgba {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

pub(crate) const BLANK: Rgba = Rgba::new(0, 0, 0, 0);
pub(crate) const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
pub(crate) const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
pub(crate) const RED: Rgba = Rgba::new(230, 41, 55, 255);
pub(crate) const ORANGE: Rgba = Rgba::new(255, 161, 0, 255);
pub(crate) const DARKBROWN: Rgba = Rgba::new(76, 63, 47, 255);
pub(crate) const SKYBLUE: Rgba = Rgba::new(102, 191, 255, 255);
pub(crate) const DARKBLUE: Rgba = Rgba::new(0, 82, 172, 255);

impl Rgba {
    pub(crate) const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise blend. `t` is clamped to [0, 1] and channels truncate, so
    /// `t == 0` returns `a` and `t == 1` returns `b` exactly.
    pub(crate) fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| -> u8 { ((1.0 - t) * x as f32 + t * y as f32) as u8 };
        Rgba {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    pub(crate) fn to_term(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}
