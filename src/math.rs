//! Mathematical utilities for the sunrise/sunset solver.

#[cfg(not(feature = "std"))]
use libm;

/// Mathematical constants
pub const PI: f64 = core::f64::consts::PI;

/// Full turn in radians (2π).
pub const TAU: f64 = core::f64::consts::TAU;

/// Computes sin(x) using the appropriate function for the compilation target.
#[inline]
pub fn sin(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.sin();

    #[cfg(not(feature = "std"))]
    return libm::sin(x);
}

/// Computes cos(x) using the appropriate function for the compilation target.
#[inline]
pub fn cos(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.cos();

    #[cfg(not(feature = "std"))]
    return libm::cos(x);
}

/// Computes atan2(y, x) using the appropriate function for the compilation target.
#[inline]
pub fn atan2(y: f64, x: f64) -> f64 {
    #[cfg(feature = "std")]
    return y.atan2(x);

    #[cfg(not(feature = "std"))]
    return libm::atan2(y, x);
}

/// Computes sqrt(x) using the appropriate function for the compilation target.
#[inline]
pub fn sqrt(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.sqrt();

    #[cfg(not(feature = "std"))]
    return libm::sqrt(x);
}

/// Truncates x toward zero using the appropriate function for the compilation target.
#[inline]
pub fn trunc(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.trunc();

    #[cfg(not(feature = "std"))]
    return libm::trunc(x);
}

/// Rounds x half away from zero using the appropriate function for the compilation target.
#[inline]
pub fn round(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.round();

    #[cfg(not(feature = "std"))]
    return libm::round(x);
}

/// Computes |x| using the appropriate function for the compilation target.
#[inline]
pub fn fabs(x: f64) -> f64 {
    #[cfg(feature = "std")]
    return x.abs();

    #[cfg(not(feature = "std"))]
    return libm::fabs(x);
}

/// Normalizes an angle in radians to the range [0, 2π).
///
/// Truncation toward zero with a negative correction, matching the
/// reference formulation of the solver.
pub fn normalize_radians_0_to_tau(value: f64) -> f64 {
    let turns = value / TAU;
    let normalized = TAU * (turns - trunc(turns));
    if normalized < 0.0 {
        normalized + TAU
    } else {
        normalized
    }
}
