// Scalar interpolation helpers. Neither function clamps; callers test band
// membership before normalizing.

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Maps `x` from `[min, max]` onto `[0, 1]`.
///
/// Equal bounds give a non-finite result (IEEE division by zero); debug builds
/// assert against it since no schedule in this crate uses a zero-width range.
pub(crate) fn normalize(min: f32, max: f32, x: f32) -> f32 {
    debug_assert!(max != min, "normalize over empty range [{min}, {max}]");
    (x - min) / (max - min)
}
