//! Angle arithmetic over the circle ℝ/2πℝ.
//!
//! Door geometry is expressed in radians.  Every comparison has to survive
//! the wrap from 2π back to 0, so proximity is tested against a window that
//! is normalised into `[0, 2π)` and may straddle zero.

use std::f64::consts::{PI, TAU};

/// Map any angle into `[0, 2π)`.
#[inline]
pub fn normalize(a: f64) -> f64 {
    a.rem_euclid(TAU)
}

/// `true` if angle `a` lies within `tolerance` of angle `b` along the
/// shorter arc.
///
/// The open window `(b - tolerance, b + tolerance)` is reduced modulo 2π.
/// When its upper end wraps below its lower end the window straddles zero and
/// membership becomes a disjunction.  Both ends are exclusive; a zero
/// tolerance matches only `b` itself.
pub fn close_to(a: f64, b: f64, tolerance: f64) -> bool {
    if tolerance >= PI {
        return true;
    }
    let a = normalize(a);
    if tolerance <= 0.0 {
        return a == normalize(b);
    }
    let max = normalize(b + tolerance);
    let min = normalize(b - tolerance);
    if max < min {
        a > min || a < max
    } else {
        a > min && a < max
    }
}

/// Radians to degrees.
#[inline]
pub fn to_degrees(rad: f64) -> f64 {
    rad * 360.0 / TAU
}

/// Radians to whole degrees, truncated toward zero.
///
/// This is the resolution the hardware link works in.
#[inline]
pub fn to_whole_degrees(rad: f64) -> i64 {
    to_degrees(rad).trunc() as i64
}
