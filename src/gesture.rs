// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! Pointer/touch gesture handling for fader knobs and slides.
//!
//! One [`GestureController`] exists per interactive control. It consumes
//! pointer samples in control-local coordinates and produces value intents;
//! it never owns event wiring and never reads the clock itself (press
//! timestamps are passed in by the event source).
//!
//! Grabbing the knob slightly off-center must not make it jump to the
//! pointer, so the offset between knob and pointer is captured at press
//! time and applied to every subsequent move of the drag.

use std::time::{Duration, Instant};

use crate::taper::{db_to_position, position_to_db};

/// Two presses on the same control within this window reset the value to
/// its default instead of starting a drag.
pub const DOUBLE_PRESS_WINDOW: Duration = Duration::from_millis(250);

/// Step applied per plus/minus press, in decibels.
pub const NUDGE_STEP_DB: f64 = 0.1;

/// Geometry of a control's interactive track, in render units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGeometry {
    /// Height of the full travel of the knob.
    pub track_height: f64,

    /// Rendered height of the knob itself.
    pub knob_height: f64,
}

/// One pointer or touch sample in control-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Vertical position, measured downwards from the top of the track.
    pub y: f64,

    /// Whether the primary button or a touch contact is down.
    pub active: bool,
}

/// Value intent produced by a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// Move the control to a normalized position in [0, 1].
    Set(f64),

    /// Reset the control to its type-specific default value.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Dragging {
        /// Offset between the knob's rendered top and the pointer,
        /// captured at press time. `None` when the press landed too far
        /// from the knob to grab it.
        knob_offset: Option<f64>,
    },
}

/// Per-control drag state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureController {
    state: State,
    last_press_at: Option<Instant>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            last_press_at: None,
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging { .. })
    }

    /// Handle a press or touch-start.
    ///
    /// A second press within [`DOUBLE_PRESS_WINDOW`] yields
    /// [`GestureIntent::Reset`] and suppresses the drag. Otherwise the
    /// knob offset is captured when the press lands within half the knob
    /// height of the knob, the drag starts, and the press itself is
    /// processed as the first move.
    pub fn on_press(
        &mut self,
        pointer: PointerSample,
        geometry: ControlGeometry,
        current_position: f64,
        now: Instant,
    ) -> Option<GestureIntent> {
        if let Some(last_press_at) = self.last_press_at.take() {
            if now.duration_since(last_press_at) <= DOUBLE_PRESS_WINDOW {
                self.state = State::Idle;
                return Some(GestureIntent::Reset);
            }
        }
        self.last_press_at = Some(now);

        let knob_top = geometry.track_height * (1.0 - current_position);
        let offset = knob_top - pointer.y;
        let knob_offset = (offset.abs() <= geometry.knob_height / 2.0).then_some(offset);
        self.state = State::Dragging { knob_offset };

        self.on_move(pointer, geometry, current_position)
    }

    /// Handle a pointer move.
    ///
    /// Only produces an intent while a drag is in progress and the
    /// button/touch is still active; the computed position is clamped into
    /// [0, 1] so the extremes stay reachable, and unchanged positions are
    /// suppressed.
    pub fn on_move(
        &mut self,
        pointer: PointerSample,
        geometry: ControlGeometry,
        current_position: f64,
    ) -> Option<GestureIntent> {
        let State::Dragging { knob_offset } = self.state else {
            return None;
        };
        if !pointer.active {
            self.on_release();
            return None;
        }
        if geometry.track_height <= 0.0 {
            return None;
        }

        let effective_y = pointer.y + knob_offset.unwrap_or(0.0);
        let position = (1.0 - effective_y / geometry.track_height).clamp(0.0, 1.0);

        #[allow(clippy::float_cmp)]
        let unchanged = position == current_position;
        if unchanged {
            return None;
        }
        Some(GestureIntent::Set(position))
    }

    /// Handle a release, touch-end, or the pointer leaving the control.
    pub fn on_release(&mut self) {
        self.state = State::Idle;
    }
}

/// Apply a plus/minus press to a normalized position.
///
/// Converts to decibels, steps by [`NUDGE_STEP_DB`], and converts back.
/// Bypasses the drag state machine entirely and works identically whether
/// or not a drag is in progress.
#[must_use]
pub fn nudge(position: f64, step_db: f64) -> f64 {
    db_to_position(position_to_db(position) + step_db)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const GEOMETRY: ControlGeometry = ControlGeometry {
        track_height: 100.0,
        knob_height: 20.0,
    };

    fn down(y: f64) -> PointerSample {
        PointerSample { y, active: true }
    }

    #[test]
    fn press_on_the_knob_does_not_jump() {
        let mut gesture = GestureController::new();
        // Knob top at y=50 for position 0.5; pressing 8 units below is
        // within half the knob height, so the offset is captured and the
        // value stays put.
        let intent = gesture.on_press(down(58.0), GEOMETRY, 0.5, Instant::now());
        assert_eq!(None, intent);
        assert!(gesture.is_dragging());
    }

    #[test]
    fn press_far_from_the_knob_jumps_to_the_pointer() {
        let mut gesture = GestureController::new();
        let intent = gesture.on_press(down(75.0), GEOMETRY, 1.0, Instant::now());
        assert_eq!(Some(GestureIntent::Set(0.25)), intent);
    }

    #[test]
    fn drag_applies_the_captured_offset() {
        let mut gesture = GestureController::new();
        let started_at = Instant::now();
        assert_eq!(None, gesture.on_press(down(58.0), GEOMETRY, 0.5, started_at));

        // Moving the pointer up by 25 units moves the value up by 0.25,
        // offset intact.
        let intent = gesture.on_move(down(33.0), GEOMETRY, 0.5);
        assert_eq!(Some(GestureIntent::Set(0.75)), intent);
    }

    #[test]
    fn drag_clamps_outside_the_track() {
        let mut gesture = GestureController::new();
        gesture.on_press(down(75.0), GEOMETRY, 1.0, Instant::now());
        assert_eq!(
            Some(GestureIntent::Set(0.0)),
            gesture.on_move(down(250.0), GEOMETRY, 0.25)
        );
        assert_eq!(
            Some(GestureIntent::Set(1.0)),
            gesture.on_move(down(-50.0), GEOMETRY, 0.0)
        );
    }

    #[test]
    fn unchanged_position_is_suppressed() {
        let mut gesture = GestureController::new();
        gesture.on_press(down(75.0), GEOMETRY, 1.0, Instant::now());
        assert_eq!(
            Some(GestureIntent::Set(0.25)),
            gesture.on_move(down(75.0), GEOMETRY, 1.0)
        );
        assert_eq!(None, gesture.on_move(down(75.0), GEOMETRY, 0.25));
    }

    #[test]
    fn release_ends_the_drag() {
        let mut gesture = GestureController::new();
        gesture.on_press(down(75.0), GEOMETRY, 1.0, Instant::now());
        gesture.on_release();
        assert!(!gesture.is_dragging());
        assert_eq!(None, gesture.on_move(down(30.0), GEOMETRY, 0.25));
    }

    #[test]
    fn inactive_move_ends_the_drag() {
        let mut gesture = GestureController::new();
        gesture.on_press(down(75.0), GEOMETRY, 1.0, Instant::now());
        let lifted = PointerSample {
            y: 30.0,
            active: false,
        };
        assert_eq!(None, gesture.on_move(lifted, GEOMETRY, 0.25));
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn double_press_resets_without_starting_a_drag() {
        let mut gesture = GestureController::new();
        let first = Instant::now();
        let second = first + Duration::from_millis(200);

        gesture.on_press(down(75.0), GEOMETRY, 1.0, first);
        gesture.on_release();
        let intent = gesture.on_press(down(75.0), GEOMETRY, 0.25, second);
        assert_eq!(Some(GestureIntent::Reset), intent);
        assert!(!gesture.is_dragging());
        assert_eq!(None, gesture.on_move(down(30.0), GEOMETRY, 0.25));
    }

    #[test]
    fn slow_second_press_starts_a_fresh_drag() {
        let mut gesture = GestureController::new();
        let first = Instant::now();
        let second = first + Duration::from_millis(300);

        gesture.on_press(down(75.0), GEOMETRY, 1.0, first);
        gesture.on_release();
        let intent = gesture.on_press(down(75.0), GEOMETRY, 0.25, second);
        assert_eq!(None, intent);
        assert!(gesture.is_dragging());
    }

    #[test]
    fn third_press_after_a_reset_drags_again() {
        let mut gesture = GestureController::new();
        let first = Instant::now();
        let second = first + Duration::from_millis(100);
        let third = first + Duration::from_millis(200);

        gesture.on_press(down(75.0), GEOMETRY, 1.0, first);
        gesture.on_release();
        assert_eq!(
            Some(GestureIntent::Reset),
            gesture.on_press(down(75.0), GEOMETRY, 0.25, second)
        );
        assert_eq!(None, gesture.on_press(down(75.0), GEOMETRY, 0.25, third));
        assert!(gesture.is_dragging());
    }

    #[test]
    fn nudge_steps_by_a_tenth_db() {
        let position = db_to_position(-6.0);
        let nudged_up = nudge(position, NUDGE_STEP_DB);
        assert_approx_eq!(f64, -5.9, position_to_db(nudged_up), epsilon = 1e-9);

        let nudged_down = nudge(position, -NUDGE_STEP_DB);
        assert_approx_eq!(f64, -6.1, position_to_db(nudged_down), epsilon = 1e-9);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn nudge_saturates_at_the_range_ends() {
        assert_eq!(1.0, nudge(1.0, NUDGE_STEP_DB));
        assert_eq!(0.0, nudge(0.0, -NUDGE_STEP_DB));
    }
}
