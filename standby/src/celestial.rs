// Sun and moon trajectories over the discrete hour of day.
//
// Each body has band tables deciding visibility and the interpolation weight
// `t`; position, radius and tint all derive from that one weight. The sun uses
// a closed window for its position but an open one for radius and tint, so at
// exactly 05:xx and 19:xx it reports a position with a zero-sized, blank disc.

use crate::band::{Band, BandTable, Schedule, Window};
use crate::color::{Rgba, BLACK, BLANK, ORANGE, RED, WHITE};
use crate::interp::lerp;

/// Drawing surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) w: u32,
    pub(crate) h: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct CelestialPos {
    pub(crate) visible: bool,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

const SUN_TRACK: BandTable<Schedule> = BandTable {
    bands: &[Band {
        window: Window::closed(5.0, 19.0),
        value: Schedule::span(5.0, 19.0),
    }],
    fallback: Schedule::Hidden,
};

const SUN_DISC: BandTable<Schedule> = BandTable {
    bands: &[Band {
        window: Window::open(5.0, 19.0),
        value: Schedule::span(5.0, 19.0),
    }],
    fallback: Schedule::Hidden,
};

// [19, 20) fails the evening test and lands on the morning schedule.
const MOON: BandTable<Schedule> = BandTable {
    bands: &[
        Band {
            window: Window::open(5.0, 19.0),
            value: Schedule::Hidden,
        },
        Band {
            window: Window::half_open(20.0, 24.0),
            value: Schedule::Span {
                from: 19.0,
                to: 24.0,
                scale: 0.5,
                offset: 0.0,
            },
        },
    ],
    fallback: Schedule::Span {
        from: 0.0,
        to: 5.0,
        scale: 0.5,
        offset: 0.5,
    },
};

fn sun_track_param(hour: f32) -> Option<f32> {
    SUN_TRACK.select(hour).param(hour)
}

fn sun_disc_param(hour: f32) -> Option<f32> {
    SUN_DISC.select(hour).param(hour)
}

fn moon_param(hour: f32) -> Option<f32> {
    MOON.select(hour).param(hour)
}

pub(crate) fn sun_pos(hour: u32, vp: Viewport) -> CelestialPos {
    match sun_track_param(hour as f32) {
        Some(t) => CelestialPos {
            visible: true,
            x: t * vp.w as f32,
            y: (t * t) * vp.h as f32,
        },
        None => CelestialPos::default(),
    }
}

pub(crate) fn sun_radius(hour: u32, vp: Viewport) -> f32 {
    sun_disc_param(hour as f32)
        .map(|t| lerp((vp.w / 8) as f32, (vp.h / 5) as f32, t))
        .unwrap_or(0.0)
}

pub(crate) fn sun_color(hour: u32) -> Rgba {
    sun_disc_param(hour as f32)
        .map(|t| Rgba::lerp(RED, ORANGE, t))
        .unwrap_or(BLANK)
}

pub(crate) fn moon_pos(hour: u32, vp: Viewport) -> CelestialPos {
    match moon_param(hour as f32) {
        Some(t) => {
            let tx = 1.0 - t;
            let ty = (1.0 - t * t).powi(2);
            CelestialPos {
                visible: true,
                x: tx * vp.w as f32,
                y: ty * vp.h as f32,
            }
        }
        None => CelestialPos::default(),
    }
}

pub(crate) fn moon_radius(hour: u32, vp: Viewport) -> f32 {
    moon_param(hour as f32)
        .map(|t| lerp((vp.h / 12) as f32, (vp.h / 6) as f32, t))
        .unwrap_or(0.0)
}

pub(crate) fn moon_color(hour: u32) -> Rgba {
    moon_param(hour as f32)
        .map(|t| Rgba::lerp(BLACK, WHITE, t))
        .unwrap_or(BLANK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::normalize;

    const HD: Viewport = Viewport { w: 1920, h: 1080 };

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn sun_disc_visible_strictly_inside_day() {
        for hour in 6..19 {
            assert!(sun_radius(hour, HD) > 0.0, "hour {hour}");
            assert_ne!(sun_color(hour), BLANK, "hour {hour}");
            assert!(sun_pos(hour, HD).visible, "hour {hour}");
        }
    }

    #[test]
    fn sun_boundary_hours_have_position_but_no_disc() {
        for hour in [5, 19] {
            assert!(sun_pos(hour, HD).visible, "hour {hour}");
            assert_eq!(sun_radius(hour, HD), 0.0, "hour {hour}");
            assert_eq!(sun_color(hour), BLANK, "hour {hour}");
        }
    }

    #[test]
    fn sun_hidden_at_night() {
        for hour in (0..5).chain(20..24) {
            assert_eq!(sun_pos(hour, HD), CelestialPos::default());
            assert_eq!(sun_radius(hour, HD), 0.0);
            assert_eq!(sun_color(hour), BLANK);
        }
    }

    #[test]
    fn sun_track_endpoints() {
        let p = sun_pos(5, HD);
        assert_eq!((p.x, p.y), (0.0, 0.0));
        let p = sun_pos(19, HD);
        assert_eq!((p.x, p.y), (1920.0, 1080.0));
    }

    #[test]
    fn noon_on_full_hd() {
        let p = sun_pos(12, HD);
        assert!(p.visible);
        assert!(close(p.x, 960.0));
        assert!(close(p.y, 270.0));
        assert!(close(sun_radius(12, HD), 228.0));
        assert_eq!(sun_color(12), Rgba::lerp(RED, ORANGE, 0.5));

        assert!(!moon_pos(12, HD).visible);
        assert_eq!(moon_radius(12, HD), 0.0);
        assert_eq!(moon_color(12), BLANK);
    }

    #[test]
    fn moon_hidden_during_day() {
        for hour in 6..19 {
            assert_eq!(moon_pos(hour, HD), CelestialPos::default());
            assert_eq!(moon_radius(hour, HD), 0.0);
            assert_eq!(moon_color(hour), BLANK);
        }
    }

    #[test]
    fn moon_visible_at_night() {
        for hour in (0..=5).chain(19..24) {
            assert!(moon_pos(hour, HD).visible, "hour {hour}");
            assert!(moon_radius(hour, HD) > 0.0, "hour {hour}");
            assert_ne!(moon_color(hour), BLANK, "hour {hour}");
        }
    }

    #[test]
    fn moon_at_nineteen_overshoots_off_screen() {
        // morning schedule gives t = 2.4 here
        assert!(close(moon_param(19.0).unwrap(), 2.4));
        assert_eq!(moon_color(19), WHITE);
        let p = moon_pos(19, HD);
        assert!(p.visible);
        assert!(p.x < 0.0);
        assert!(p.y > HD.h as f32);
        assert!(close(moon_radius(19, HD), lerp(90.0, 180.0, 2.4)));
    }

    #[test]
    fn midnight_moon_on_full_hd() {
        let p = moon_pos(0, HD);
        assert!(p.visible);
        assert!(close(p.x, 960.0));
        assert!(close(p.y, 1080.0 * 0.5625));
        assert!(close(moon_radius(0, HD), 135.0));
        assert_eq!(moon_color(0), Rgba::lerp(BLACK, WHITE, 0.5));
    }

    #[test]
    fn moon_seam_uses_morning_schedule() {
        let morning = |h: f32| normalize(0.0, 5.0, h) * 0.5 + 0.5;
        assert_eq!(moon_param(19.0), Some(morning(19.0)));
        assert_eq!(moon_param(19.999), Some(morning(19.999)));
        assert_eq!(moon_param(20.0), Some(0.5 * 0.2));
    }

    #[test]
    fn moon_evening_band_brightens_towards_midnight() {
        let t20 = moon_param(20.0).unwrap();
        let t23 = moon_param(23.0).unwrap();
        assert!(t20 < t23);
        assert!(t23 < 0.5);
        assert!(moon_color(20).r < moon_color(23).r);
    }

    #[test]
    fn moon_reaches_full_brightness_at_five() {
        assert_eq!(moon_param(5.0), Some(1.0));
        assert_eq!(moon_color(5), WHITE);
        let p = moon_pos(5, HD);
        assert_eq!((p.x, p.y), (0.0, 0.0));
        assert_eq!(moon_radius(5, HD), 180.0);
    }
}
