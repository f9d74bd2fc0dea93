//! Unit conversion utilities.
//!
//! RTF measures paragraph geometry in twips and font sizes in half-points.
//! Styled output is expressed in pixels.

pub const TWIPS_PER_POINT: i32 = 20;
pub const HALF_POINTS_PER_INCH: i32 = 144;

/// Default screen resolution used to size fonts.
pub const DEFAULT_DPI: u32 = 96;

#[inline]
pub fn twips_to_pixels(twips: i32) -> i32 {
    twips / TWIPS_PER_POINT
}

/// Convert a half-point font size to pixels at `dpi`.
#[inline]
pub fn half_points_to_pixels(half_points: i32, dpi: u32) -> i32 {
    let pixels = half_points as i64 * dpi as i64 / HALF_POINTS_PER_INCH as i64;
    pixels.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
