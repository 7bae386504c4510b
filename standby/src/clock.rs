use chrono::{Local, Timelike};
use std::time::Instant;

/// One reading of the clock. Every model in a frame is fed from the same
/// sample so the sky, sun and moon agree on "now".
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TimeSample {
    pub(crate) hour: u32,
    pub(crate) minute: u32,
    /// Continuous hour for the backdrop gradient.
    pub(crate) sky_hour: f32,
}

impl TimeSample {
    pub(crate) fn new(hour: u32, minute: u32, smooth: bool) -> Self {
        let sky_hour = if smooth {
            hour as f32 + minute as f32 / 60.0
        } else {
            hour as f32
        };
        Self {
            hour,
            minute,
            sky_hour,
        }
    }

    pub(crate) fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum TimeSource {
    System,
    Fixed {
        hour: u32,
        minute: u32,
    },
    /// `speed` clock hours pass per real second, starting from `origin_hours`.
    Accelerated {
        started: Instant,
        origin_hours: f32,
        speed: f32,
    },
}

impl TimeSource {
    pub(crate) fn sample(&self, now: Instant, smooth: bool) -> TimeSample {
        match *self {
            TimeSource::System => {
                let t = Local::now();
                TimeSample::new(t.hour(), t.minute(), smooth)
            }
            TimeSource::Fixed { hour, minute } => TimeSample::new(hour, minute, smooth),
            TimeSource::Accelerated {
                started,
                origin_hours,
                speed,
            } => {
                let elapsed = now.saturating_duration_since(started).as_secs_f32();
                let hours = wrap_hours(origin_hours + elapsed * speed);
                let (hour, minute) = split_hours(hours);
                let sky_hour = if smooth { hours } else { hour as f32 };
                TimeSample {
                    hour,
                    minute,
                    sky_hour,
                }
            }
        }
    }
}

/// Current local time as fractional hours.
pub(crate) fn local_hours() -> f32 {
    let t = Local::now();
    t.hour() as f32 + t.minute() as f32 / 60.0 + t.second() as f32 / 3600.0
}

fn wrap_hours(h: f32) -> f32 {
    let w = h.rem_euclid(24.0);
    // rem_euclid can round up to exactly 24.0 for tiny negative inputs
    if w >= 24.0 {
        0.0
    } else {
        w
    }
}

fn split_hours(hours: f32) -> (u32, u32) {
    let hour = (hours.floor() as u32).min(23);
    let minute = (((hours - hour as f32) * 60.0).floor() as u32).min(59);
    (hour, minute)
}

/// Parses `HH:MM` on a 24-hour clock.
pub(crate) fn parse_hh_mm(s: &str) -> Result<(u32, u32), String> {
    let (h, m) = s
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got {s:?}"))?;
    let hour: u32 = h
        .trim()
        .parse()
        .map_err(|_| format!("bad hour in {s:?}"))?;
    let minute: u32 = m
        .trim()
        .parse()
        .map_err(|_| format!("bad minute in {s:?}"))?;
    if hour > 23 {
        return Err(format!("hour {hour} out of range 0-23"));
    }
    if minute > 59 {
        return Err(format!("minute {minute} out of range 0-59"));
    }
    Ok((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn label_is_zero_padded() {
        assert_eq!(TimeSample::new(7, 5, false).label(), "07:05");
        assert_eq!(TimeSample::new(23, 59, false).label(), "23:59");
        assert_eq!(TimeSample::new(0, 0, false).label(), "00:00");
    }

    #[test]
    fn sky_hour_follows_smoothing() {
        assert_eq!(TimeSample::new(10, 30, false).sky_hour, 10.0);
        assert_eq!(TimeSample::new(10, 30, true).sky_hour, 10.5);
    }

    #[test]
    fn fixed_source_ignores_wall_clock() {
        let src = TimeSource::Fixed {
            hour: 21,
            minute: 15,
        };
        let s = src.sample(Instant::now(), false);
        assert_eq!((s.hour, s.minute), (21, 15));
    }

    #[test]
    fn accelerated_source_advances_and_wraps() {
        let started = Instant::now();
        let src = TimeSource::Accelerated {
            started,
            origin_hours: 22.0,
            speed: 1.0,
        };
        let s = src.sample(started, false);
        assert_eq!((s.hour, s.minute), (22, 0));

        let s = src.sample(started + Duration::from_millis(1500), true);
        assert_eq!((s.hour, s.minute), (23, 30));
        assert!((s.sky_hour - 23.5).abs() < 1e-3);

        let s = src.sample(started + Duration::from_secs(3), false);
        assert_eq!((s.hour, s.minute), (1, 0));
        assert_eq!(s.sky_hour, 1.0);
    }

    #[test]
    fn accelerated_source_runs_backwards() {
        let started = Instant::now();
        let src = TimeSource::Accelerated {
            started,
            origin_hours: 1.0,
            speed: -2.0,
        };
        let s = src.sample(started + Duration::from_secs(1), false);
        assert_eq!((s.hour, s.minute), (23, 0));
    }

    #[test]
    fn wrap_stays_in_range() {
        assert_eq!(wrap_hours(24.0), 0.0);
        assert_eq!(wrap_hours(-1.0), 23.0);
        assert!(wrap_hours(-1e-9) < 24.0);
    }

    #[test]
    fn parses_clock_strings() {
        assert_eq!(parse_hh_mm("05:30"), Ok((5, 30)));
        assert_eq!(parse_hh_mm("0:0"), Ok((0, 0)));
        assert!(parse_hh_mm("24:00").is_err());
        assert!(parse_hh_mm("12:60").is_err());
        assert!(parse_hh_mm("noon").is_err());
        assert!(parse_hh_mm("12:xx").is_err());
    }
}
