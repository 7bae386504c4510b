use crate::band::{Band, BandTable, Window};
use crate::color::{Rgba, BLACK, DARKBLUE, DARKBROWN, SKYBLUE};
use crate::interp::normalize;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Shade {
    Solid(Rgba),
    Gradient {
        start: f32,
        end: f32,
        from: Rgba,
        to: Rgba,
    },
}

const fn gradient(start: f32, end: f32, from: Rgba, to: Rgba) -> Band<Shade> {
    Band {
        window: Window::half_open(start, end),
        value: Shade::Gradient {
            start,
            end,
            from,
            to,
        },
    }
}

// 00:00..04:00 has no band and falls back to black.
const SKY: BandTable<Shade> = BandTable {
    bands: &[
        gradient(4.0, 6.0, BLACK, DARKBROWN),
        gradient(6.0, 15.0, DARKBROWN, SKYBLUE),
        gradient(15.0, 20.0, SKYBLUE, DARKBLUE),
        gradient(20.0, 24.0, DARKBLUE, BLACK),
    ],
    fallback: Shade::Solid(BLACK),
};

/// Backdrop color for a continuous hour in `[0, 24)`.
pub(crate) fn sky_color(hour: f32) -> Rgba {
    match SKY.select(hour) {
        Shade::Solid(c) => c,
        Shade::Gradient {
            start,
            end,
            from,
            to,
        } => Rgba::lerp(from, to, normalize(start, end, hour)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mid_morning_blends_brown_to_blue() {
        let want = Rgba::lerp(DARKBROWN, SKYBLUE, normalize(6.0, 15.0, 10.0));
        assert_eq!(sky_color(10.0), want);
    }

    #[test]
    fn small_hours_fall_back_to_black() {
        for h in [0.0, 1.0, 2.0, 3.0, 3.99] {
            assert_eq!(sky_color(h), BLACK, "hour {h}");
        }
    }

    #[test]
    fn band_starts_take_the_from_color() {
        assert_eq!(sky_color(4.0), BLACK);
        assert_eq!(sky_color(6.0), DARKBROWN);
        assert_eq!(sky_color(15.0), SKYBLUE);
        assert_eq!(sky_color(20.0), DARKBLUE);
    }

    #[test]
    fn noon_is_two_thirds_to_sky_blue() {
        let want = Rgba::lerp(DARKBROWN, SKYBLUE, normalize(6.0, 15.0, 12.0));
        assert_eq!(sky_color(12.0), want);
        assert!(sky_color(12.0).b > DARKBROWN.b);
    }

    #[test]
    fn fractional_hours_move_smoothly() {
        let a = sky_color(7.0);
        let b = sky_color(7.5);
        let c = sky_color(8.0);
        assert!(a.b <= b.b && b.b <= c.b);
        assert_ne!(a, c);
    }

    #[test]
    fn late_evening_fades_to_black() {
        let near_midnight = sky_color(23.9);
        assert!(near_midnight.b < DARKBLUE.b / 4);
    }
}
