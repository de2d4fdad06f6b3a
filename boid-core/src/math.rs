//! Float helpers that route through `libm` when the standard library is unavailable.

#[cfg(feature = "std")]
pub(crate) fn sqrt(value: f32) -> f32 {
    value.sqrt()
}

#[cfg(not(feature = "std"))]
pub(crate) fn sqrt(value: f32) -> f32 {
    libm::sqrtf(value)
}

#[cfg(feature = "std")]
pub(crate) fn acos(value: f32) -> f32 {
    value.acos()
}

#[cfg(not(feature = "std"))]
pub(crate) fn acos(value: f32) -> f32 {
    libm::acosf(value)
}

#[cfg(feature = "std")]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    angle.sin_cos()
}

#[cfg(not(feature = "std"))]
pub(crate) fn sin_cos(angle: f32) -> (f32, f32) {
    libm::sincosf(angle)
}

#[cfg(feature = "std")]
pub(crate) fn powf(base: f32, exponent: f32) -> f32 {
    base.powf(exponent)
}

#[cfg(not(feature = "std"))]
pub(crate) fn powf(base: f32, exponent: f32) -> f32 {
    libm::powf(base, exponent)
}

#[cfg(feature = "std")]
pub(crate) fn abs(value: f32) -> f32 {
    value.abs()
}

#[cfg(not(feature = "std"))]
pub(crate) fn abs(value: f32) -> f32 {
    libm::fabsf(value)
}
