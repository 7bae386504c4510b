// Ordered hour bands with explicit open/closed edges.
//
// A table is scanned front to back and the first window containing the hour
// wins; anything no window claims gets the fallback. Overlaps are legal and
// resolved by order.

use crate::interp::normalize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Edge {
    Open(f32),
    Closed(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Window {
    pub(crate) lo: Edge,
    pub(crate) hi: Edge,
}

impl Window {
    /// `[lo, hi]`
    pub(crate) const fn closed(lo: f32, hi: f32) -> Self {
        Self {
            lo: Edge::Closed(lo),
            hi: Edge::Closed(hi),
        }
    }

    /// `(lo, hi)`
    pub(crate) const fn open(lo: f32, hi: f32) -> Self {
        Self {
            lo: Edge::Open(lo),
            hi: Edge::Open(hi),
        }
    }

    /// `[lo, hi)`
    pub(crate) const fn half_open(lo: f32, hi: f32) -> Self {
        Self {
            lo: Edge::Closed(lo),
            hi: Edge::Open(hi),
        }
    }

    pub(crate) fn contains(&self, x: f32) -> bool {
        let above = match self.lo {
            Edge::Open(v) => x > v,
            Edge::Closed(v) => x >= v,
        };
        let below = match self.hi {
            Edge::Open(v) => x < v,
            Edge::Closed(v) => x <= v,
        };
        above && below
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Band<T> {
    pub(crate) window: Window,
    pub(crate) value: T,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct BandTable<T: 'static> {
    pub(crate) bands: &'static [Band<T>],
    pub(crate) fallback: T,
}

impl<T: Copy> BandTable<T> {
    pub(crate) fn select(&self, hour: f32) -> T {
        self.bands
            .iter()
            .find(|b| b.window.contains(hour))
            .map(|b| b.value)
            .unwrap_or(self.fallback)
    }
}

/// How a body's interpolation weight is derived inside a band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Schedule {
    Hidden,
    /// `t = normalize(from, to, hour) * scale + offset`
    Span {
        from: f32,
        to: f32,
        scale: f32,
        offset: f32,
    },
}

impl Schedule {
    pub(crate) const fn span(from: f32, to: f32) -> Self {
        Schedule::Span {
            from,
            to,
            scale: 1.0,
            offset: 0.0,
        }
    }

    /// `None` while hidden.
    pub(crate) fn param(self, hour: f32) -> Option<f32> {
        match self {
            Schedule::Hidden => None,
            Schedule::Span {
                from,
                to,
                scale,
                offset,
            } => Some(normalize(from, to, hour) * scale + offset),
        }
    }
}
