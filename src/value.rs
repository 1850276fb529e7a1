// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! Conversions between UI, decibel and console-native value spaces.
//!
//! The fader taper itself lives in [`crate::taper`]; this module covers the
//! remaining value spaces: the signed pan encoding of the console, the
//! 1/16-dB fixed-point level encoding used on the console side, and the
//! human-readable decibel label.
//!
//! All conversions are pure and total. Out-of-range inputs are clamped,
//! never rejected.

use crate::taper::{db_to_position, DB_MAX, DB_MIN, FADER_TICKS_DB};

/// Leftmost console-native pan value.
pub const PAN_MIN: i32 = -30;

/// Rightmost console-native pan value.
pub const PAN_MAX: i32 = 30;

/// Centered console-native pan value.
pub const PAN_CENTER: i32 = 0;

/// Width of the native pan range.
const PAN_RANGE_WIDTH: f64 = (PAN_MAX - PAN_MIN) as f64;

/// Convert a console-native pan value into a signed center offset.
///
/// The result is in [-0.5, 0.5] and positions the pan indicator relative
/// to the center of its slide.
#[must_use]
pub fn pan_to_position(native_pan: i32) -> f64 {
    f64::from(native_pan.clamp(PAN_MIN, PAN_MAX)) / PAN_RANGE_WIDTH
}

/// Convert a signed center offset back into a console-native pan value.
///
/// Exact inverse of [`pan_to_position`] for every native pan value after
/// rounding.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn position_to_native_pan(position: f64) -> i32 {
    (position.clamp(-0.5, 0.5) * PAN_RANGE_WIDTH).round() as i32
}

/// Convert a pan slide position in [0, 1] into a console-native pan value.
///
/// The slide maps its full travel onto the native range, with 0.5 hitting
/// the 30-unit center offset exactly.
#[must_use]
pub fn slide_to_native_pan(position: f64) -> i32 {
    position_to_native_pan(position.clamp(0.0, 1.0) - 0.5)
}

/// Convert a console-native pan value into a pan slide position in [0, 1].
#[must_use]
pub fn pan_to_slide(native_pan: i32) -> f64 {
    pan_to_position(native_pan) + 0.5
}

/// Convert a console 1/16-dB fixed-point level into decibels.
///
/// The console transmits fader levels as multiples of 1/16 dB offset from
/// -80 dB, i.e. 0 is -80 dB and 1472 is +12 dB.
#[must_use]
pub fn console_level_to_db(level: f64) -> f64 {
    (level / 16.0 - 80.0).clamp(DB_MIN, DB_MAX)
}

/// Convert decibels into the console 1/16-dB fixed-point level.
#[must_use]
pub fn db_to_console_level(db: f64) -> f64 {
    (db.clamp(DB_MIN, DB_MAX) + 80.0) * 16.0
}

/// Format a decibel level for the value indicator.
///
/// Non-negative levels carry an explicit plus sign: `"+12.00"`, `"+0.00"`,
/// `"-6.50"`.
#[must_use]
pub fn format_db(db: f64) -> String {
    // Negative zero reads as centered.
    let db = if db == 0.0 { 0.0 } else { db };
    format!("{db:+.2}")
}

/// Decibel value and normalized position of each taper tick mark.
///
/// Yields the render positions for the scale drawn next to a fader, from
/// the top tick (+12 dB at position 1.0) down to the bottom one (-80 dB at
/// position 0.0).
#[must_use]
pub fn tick_positions() -> [(f64, f64); 9] {
    FADER_TICKS_DB.map(|tick_db| (tick_db, db_to_position(tick_db)))
}
