// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! Per-channel control state.
//!
//! One [`ChannelStrip`] exists per mixer channel for the whole session. It
//! is the single source of truth that the render surface reads and that
//! both local edits and remote pushes write into. Effect sequencing (render
//! requests, outbound pushes) is the sync engine's concern and keyed on the
//! change flag returned by [`ChannelStrip::set`].

use crate::{
    taper::{DB_MAX, DB_MIN},
    value::{PAN_CENTER, PAN_MAX, PAN_MIN},
    ChannelIndex, SendIndex, SurfaceDescriptor,
};

/// Addressable parameter of a channel strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripParameter {
    Volume,
    Mute,
    Pan,
    AuxSend(SendIndex),
    FxSend(SendIndex),
}

impl StripParameter {
    /// The reset target applied on a double-press.
    #[must_use]
    pub const fn default_value(self) -> ParamValue {
        match self {
            Self::Volume | Self::AuxSend(_) | Self::FxSend(_) => ParamValue::Db(0.0),
            Self::Mute => ParamValue::Switch(false),
            Self::Pan => ParamValue::Pan(PAN_CENTER),
        }
    }

    /// All parameters kept in sync with the console for the given surface.
    pub fn tracked(descriptor: &SurfaceDescriptor) -> impl Iterator<Item = Self> {
        let num_aux = descriptor.num_aux_sends.min(SendIndex::MAX) as usize;
        let num_fx = descriptor.num_fx_sends.min(SendIndex::MAX) as usize;
        [Self::Volume, Self::Mute, Self::Pan]
            .into_iter()
            .chain(SendIndex::ALL.into_iter().take(num_aux).map(Self::AuxSend))
            .chain(SendIndex::ALL.into_iter().take(num_fx).map(Self::FxSend))
    }
}

/// Typed value of a strip parameter.
///
/// Levels are decibels, switches are booleans, pan is the signed
/// console-native encoding. A value of the wrong kind for a parameter is a
/// programming error on the typed path and silently dropped on the wire
/// path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Db(f64),
    Switch(bool),
    Pan(i32),
}

/// Control state of a single mixer channel.
///
/// Created once per channel at engine construction and never destroyed
/// during a session. Levels initialize to the fader bottom (-80 dB); a
/// lost get reply leaves them there until the next push.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStrip {
    volume_db: f64,
    muted: bool,
    pan: i32,
    aux_send: [f64; SendIndex::MAX as usize],
    fx_send: [f64; SendIndex::MAX as usize],
    display_name: String,
}

impl ChannelStrip {
    /// Create the strip for a channel with its default display name, the
    /// 1-based channel number.
    #[must_use]
    pub fn new(channel: ChannelIndex) -> Self {
        Self {
            volume_db: DB_MIN,
            muted: false,
            pan: PAN_CENTER,
            aux_send: [DB_MIN; SendIndex::MAX as usize],
            fx_send: [DB_MIN; SendIndex::MAX as usize],
            display_name: channel.channel_number().to_string(),
        }
    }

    #[must_use]
    pub const fn volume_db(&self) -> f64 {
        self.volume_db
    }

    #[must_use]
    pub const fn muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub const fn pan(&self) -> i32 {
        self.pan
    }

    #[must_use]
    pub const fn aux_send_db(&self, send: SendIndex) -> f64 {
        self.aux_send[send.to_array_index()]
    }

    #[must_use]
    pub const fn fx_send_db(&self, send: SendIndex) -> f64 {
        self.fx_send[send.to_array_index()]
    }

    /// Free-text label, persisted externally and never synchronized.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    #[must_use]
    pub const fn get(&self, parameter: StripParameter) -> ParamValue {
        match parameter {
            StripParameter::Volume => ParamValue::Db(self.volume_db),
            StripParameter::Mute => ParamValue::Switch(self.muted),
            StripParameter::Pan => ParamValue::Pan(self.pan),
            StripParameter::AuxSend(send) => ParamValue::Db(self.aux_send[send.to_array_index()]),
            StripParameter::FxSend(send) => ParamValue::Db(self.fx_send[send.to_array_index()]),
        }
    }

    /// Store a value, clamped into the parameter's range.
    ///
    /// Returns whether the stored value changed. Write origin is not a
    /// concern here; the sync engine decides what a change entails.
    pub fn set(&mut self, parameter: StripParameter, value: ParamValue) -> bool {
        match (parameter, value) {
            (StripParameter::Volume, ParamValue::Db(db)) => replace_db(&mut self.volume_db, db),
            (StripParameter::Mute, ParamValue::Switch(muted)) => {
                let changed = self.muted != muted;
                self.muted = muted;
                changed
            }
            (StripParameter::Pan, ParamValue::Pan(pan)) => {
                let pan = pan.clamp(PAN_MIN, PAN_MAX);
                let changed = self.pan != pan;
                self.pan = pan;
                changed
            }
            (StripParameter::AuxSend(send), ParamValue::Db(db)) => {
                replace_db(&mut self.aux_send[send.to_array_index()], db)
            }
            (StripParameter::FxSend(send), ParamValue::Db(db)) => {
                replace_db(&mut self.fx_send[send.to_array_index()], db)
            }
            (parameter, value) => {
                debug_assert!(false, "value {value:?} does not fit parameter {parameter:?}");
                false
            }
        }
    }
}

#[allow(clippy::float_cmp)]
fn replace_db(slot: &mut f64, db: f64) -> bool {
    let db = db.clamp(DB_MIN, DB_MAX);
    let changed = *slot != db;
    *slot = db;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> ChannelStrip {
        ChannelStrip::new(ChannelIndex::new(2))
    }

    #[test]
    fn default_display_name_is_the_channel_number() {
        assert_eq!("3", strip().display_name());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn initializes_at_the_fader_bottom() {
        let strip = strip();
        assert_eq!(DB_MIN, strip.volume_db());
        assert_eq!(PAN_CENTER, strip.pan());
        assert!(!strip.muted());
        for send in SendIndex::ALL {
            assert_eq!(DB_MIN, strip.aux_send_db(send));
            assert_eq!(DB_MIN, strip.fx_send_db(send));
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn set_clamps_and_reports_changes() {
        let mut strip = strip();
        assert!(strip.set(StripParameter::Volume, ParamValue::Db(0.0)));
        assert!(!strip.set(StripParameter::Volume, ParamValue::Db(0.0)));
        assert!(strip.set(StripParameter::Volume, ParamValue::Db(99.0)));
        assert_eq!(DB_MAX, strip.volume_db());

        assert!(strip.set(StripParameter::Pan, ParamValue::Pan(-99)));
        assert_eq!(PAN_MIN, strip.pan());
        assert!(!strip.set(StripParameter::Pan, ParamValue::Pan(PAN_MIN)));

        assert!(strip.set(StripParameter::Mute, ParamValue::Switch(true)));
        assert!(!strip.set(StripParameter::Mute, ParamValue::Switch(true)));

        let send = SendIndex::new(2).unwrap();
        assert!(strip.set(StripParameter::AuxSend(send), ParamValue::Db(-6.0)));
        assert_eq!(-6.0, strip.aux_send_db(send));
        assert_eq!(DB_MIN, strip.aux_send_db(SendIndex::new(1).unwrap()));
    }

    #[test]
    fn default_values_per_parameter() {
        assert_eq!(
            ParamValue::Db(0.0),
            StripParameter::Volume.default_value()
        );
        assert_eq!(ParamValue::Pan(PAN_CENTER), StripParameter::Pan.default_value());
        assert_eq!(
            ParamValue::Switch(false),
            StripParameter::Mute.default_value()
        );
        assert_eq!(
            ParamValue::Db(0.0),
            StripParameter::FxSend(SendIndex::new(4).unwrap()).default_value()
        );
    }

    #[test]
    fn tracked_parameters_for_the_full_surface() {
        let tracked: Vec<_> = StripParameter::tracked(&SurfaceDescriptor::DEFAULT).collect();
        assert_eq!(11, tracked.len());
        assert_eq!(StripParameter::Volume, tracked[0]);
        assert_eq!(
            StripParameter::AuxSend(SendIndex::new(1).unwrap()),
            tracked[3]
        );
        assert_eq!(
            StripParameter::FxSend(SendIndex::new(4).unwrap()),
            tracked[10]
        );
    }
}
