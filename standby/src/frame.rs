use crate::celestial::{
    moon_color, moon_pos, moon_radius, sun_color, sun_pos, sun_radius, CelestialPos, Viewport,
};
use crate::clock::TimeSample;
use crate::color::Rgba;
use crate::sky::sky_color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BodyFrame {
    pub(crate) pos: CelestialPos,
    pub(crate) radius: f32,
    pub(crate) color: Rgba,
}

impl BodyFrame {
    pub(crate) fn drawable(&self) -> bool {
        self.pos.visible
    }
}

/// Everything drawn in one frame, derived from a single time sample.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SkyFrame {
    pub(crate) sky: Rgba,
    pub(crate) moon: BodyFrame,
    pub(crate) sun: BodyFrame,
    pub(crate) label: String,
}

impl SkyFrame {
    pub(crate) fn compute(sample: &TimeSample, vp: Viewport) -> Self {
        let hour = sample.hour;
        Self {
            sky: sky_color(sample.sky_hour),
            moon: BodyFrame {
                pos: moon_pos(hour, vp),
                radius: moon_radius(hour, vp),
                color: moon_color(hour),
            },
            sun: BodyFrame {
                pos: sun_pos(hour, vp),
                radius: sun_radius(hour, vp),
                color: sun_color(hour),
            },
            label: sample.label(),
        }
    }

    /// Bodies in paint order: moon under sun.
    pub(crate) fn bodies(&self) -> [&BodyFrame; 2] {
        [&self.moon, &self.sun]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, DARKBROWN, ORANGE, RED, SKYBLUE};
    use crate::interp::normalize;

    const HD: Viewport = Viewport { w: 1920, h: 1080 };

    #[test]
    fn noon_frame() {
        let f = SkyFrame::compute(&TimeSample::new(12, 0, false), HD);
        assert!(f.sun.drawable());
        assert!(!f.moon.drawable());
        assert!((f.sun.pos.x - 960.0).abs() < 1e-3);
        assert!((f.sun.pos.y - 270.0).abs() < 1e-3);
        assert!((f.sun.radius - 228.0).abs() < 1e-3);
        assert_eq!(f.sun.color, Rgba::lerp(RED, ORANGE, 0.5));
        assert_eq!(
            f.sky,
            Rgba::lerp(DARKBROWN, SKYBLUE, normalize(6.0, 15.0, 12.0))
        );
        assert_eq!(f.label, "12:00");
    }

    #[test]
    fn midnight_frame() {
        let f = SkyFrame::compute(&TimeSample::new(0, 0, false), HD);
        assert!(f.moon.drawable());
        assert!(!f.sun.drawable());
        assert!((f.moon.pos.x - 960.0).abs() < 1e-3);
        assert_eq!(f.sky, BLACK);
    }

    #[test]
    fn bodies_use_whole_hour_while_sky_is_smooth() {
        let coarse = SkyFrame::compute(&TimeSample::new(9, 45, false), HD);
        let smooth = SkyFrame::compute(&TimeSample::new(9, 45, true), HD);
        assert_eq!(coarse.sun, smooth.sun);
        assert_eq!(coarse.moon, smooth.moon);
        assert_ne!(coarse.sky, smooth.sky);
    }

    #[test]
    fn moon_paints_before_sun() {
        let f = SkyFrame::compute(&TimeSample::new(5, 0, false), HD);
        let [first, second] = f.bodies();
        assert_eq!(first, &f.moon);
        assert_eq!(second, &f.sun);
    }
}
