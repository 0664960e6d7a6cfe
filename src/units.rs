//! Unit Converter - Millimeters <-> Internal Units
//!
//! The consuming application stores geometry in its own integer unit system.
//! One millimeter is `UNITS_PER_MM` internal units.
//!
//! Rounding is half-away-from-zero (`f64::round`): 0.0625 mm -> 63, -0.0625 mm -> -63.
//! No range checks are performed; callers own value validity.

/// Internal units per millimeter
pub const UNITS_PER_MM: f64 = 1000.0;

/// Convert millimeters to the nearest internal unit
pub fn mm_to_internal(mm: f64) -> i64 {
    (mm * UNITS_PER_MM).round() as i64
}

/// Convert internal units back to millimeters (no rounding)
pub fn internal_to_mm(units: f64) -> f64 {
    units / UNITS_PER_MM
}

/// Convert internal units to whole millimeters, rounded half away from zero
pub fn internal_to_mm_rounded(units: i64) -> i64 {
    internal_to_mm(units as f64).round() as i64
}
