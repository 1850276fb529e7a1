// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! Piecewise-linear fader taper.
//!
//! Maps a normalized fader position in [0, 1] to a decibel level and back,
//! modeling the non-linear travel of a physical audio fader: the upper half
//! of the fader covers only a few dB while the lower end drops off steeply.

/// Decibel values of the taper control points, from the fader top (loudest)
/// down to the bottom (quietest).
///
/// The control points are evenly spaced along the normalized fader travel:
/// position 1.0 maps to the first entry, position 0.0 to the last.
pub const FADER_TICKS_DB: [f64; 9] = [12.0, 6.0, 0.0, -6.0, -12.0, -24.0, -48.0, -60.0, -80.0];

/// Lowest representable fader level.
pub const DB_MIN: f64 = -80.0;

/// Highest representable fader level.
pub const DB_MAX: f64 = 12.0;

/// Convert a normalized fader position into a decibel level.
///
/// The input is clamped into [0, 1]. Exact at all control points of
/// [`FADER_TICKS_DB`], linearly interpolated in between.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn position_to_db(position: f64) -> f64 {
    let position = position.clamp(0.0, 1.0);

    #[allow(clippy::cast_precision_loss)]
    let index = (1.0 - position) * (FADER_TICKS_DB.len() - 1) as f64;

    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;
    let fraction = index - index.floor();

    let lower_value = FADER_TICKS_DB[lower_index];
    let upper_value = FADER_TICKS_DB[upper_index];
    lower_value + (upper_value - lower_value) * fraction
}

/// Convert a decibel level into a normalized fader position.
///
/// The input is clamped into [[`DB_MIN`], [`DB_MAX`]]. Exact inverse of
/// [`position_to_db`] at all control points of [`FADER_TICKS_DB`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn db_to_position(db: f64) -> f64 {
    // Ascending distance below the topmost control point. A linear scan
    // over the bracketing pair suffices for a 9-element table.
    let sequence = FADER_TICKS_DB.map(|tick_db| -(tick_db - DB_MAX));
    let max_index = sequence.len() - 1;

    let query = (-(db - DB_MAX)).clamp(sequence[0], sequence[max_index]);

    let mut lower_index = 0;
    for i in 0..max_index {
        if query >= sequence[i] && query <= sequence[i + 1] {
            lower_index = i;
            break;
        }
    }

    let lower_value = sequence[lower_index];
    let upper_value = sequence[lower_index + 1];
    let fraction = (query - lower_value) / (upper_value - lower_value);

    let index = lower_index as f64 + fraction;
    1.0 - index / max_index as f64
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[allow(clippy::cast_precision_loss)]
    fn tick_position(tick_index: usize) -> f64 {
        1.0 - tick_index as f64 / (FADER_TICKS_DB.len() - 1) as f64
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn exact_at_control_points() {
        for (tick_index, &tick_db) in FADER_TICKS_DB.iter().enumerate() {
            let position = tick_position(tick_index);
            assert_eq!(tick_db, position_to_db(position));
            assert_eq!(position, db_to_position(tick_db));
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn round_trip_at_control_points() {
        for &tick_db in &FADER_TICKS_DB {
            assert_eq!(tick_db, position_to_db(db_to_position(tick_db)));
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn clamps_at_the_extremes() {
        assert_eq!(0.0, db_to_position(DB_MIN));
        assert_eq!(1.0, db_to_position(DB_MAX));
        assert_eq!(0.0, db_to_position(-200.0));
        assert_eq!(1.0, db_to_position(100.0));
        assert_eq!(DB_MIN, position_to_db(-0.5));
        assert_eq!(DB_MAX, position_to_db(1.5));
    }

    #[test]
    fn monotonically_non_increasing() {
        let mut last_db = f64::INFINITY;
        for step in 0..=1000 {
            let position = 1.0 - f64::from(step) / 1000.0;
            let db = position_to_db(position);
            assert!(db <= last_db, "taper not monotonic at position {position}");
            last_db = db;
        }
    }

    #[test]
    fn forward_and_inverse_agree_between_control_points() {
        for step in 0..=1000 {
            let position = f64::from(step) / 1000.0;
            let round_tripped = db_to_position(position_to_db(position));
            assert_approx_eq!(f64, position, round_tripped, epsilon = 1e-12);
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn interpolates_between_control_points() {
        // Halfway between the +12 and +6 ticks.
        assert_eq!(9.0, position_to_db(1.0 - 0.5 / 8.0));
        // Halfway between the -60 and -80 ticks.
        assert_eq!(-70.0, position_to_db(0.5 / 8.0));
    }
}
