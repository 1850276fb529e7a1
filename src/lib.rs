// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

pub mod gesture;
pub mod page;
pub mod strip;
pub mod sync;
pub mod taper;
pub mod value;

/// 0-based index of a mixer channel.
///
/// The console protocol addresses channels by their 1-based
/// [channel number](ChannelIndex::channel_number).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::From,
)]
#[repr(transparent)]
pub struct ChannelIndex(usize);

impl ChannelIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn to_usize(self) -> usize {
        self.0
    }

    /// 1-based channel number as used on the wire.
    #[must_use]
    pub const fn channel_number(self) -> u16 {
        #[allow(clippy::cast_possible_truncation)]
        {
            self.0 as u16 + 1
        }
    }

    /// Convert a 1-based wire channel number back into an index.
    ///
    /// Returns `None` for the invalid channel number 0.
    #[must_use]
    pub const fn from_channel_number(channel_number: u16) -> Option<Self> {
        if channel_number == 0 {
            return None;
        }
        Some(Self(channel_number as usize - 1))
    }
}

/// 1-based index of an aux or fx send (1..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[repr(transparent)]
pub struct SendIndex(u8);

impl SendIndex {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub const ALL: [Self; 4] = [Self(1), Self(2), Self(3), Self(4)];

    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index >= Self::MIN && index <= Self::MAX {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 0-based position within a per-channel send array.
    #[must_use]
    pub const fn to_array_index(self) -> usize {
        self.0 as usize - 1
    }
}

/// Static description of the controlled mixer surface.
///
/// Each engine instance must always be driven with the same descriptor
/// during its lifetime!
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    /// Number of mixer channels
    pub num_channels: u8,

    /// Number of auxiliary send buses per channel
    pub num_aux_sends: u8,

    /// Number of effect send buses per channel
    pub num_fx_sends: u8,

    /// Number of channel strips shown per page
    pub channels_per_page: u8,
}

impl SurfaceDescriptor {
    /// The full, paginated 64-channel surface.
    pub const DEFAULT: Self = Self {
        num_channels: 64,
        num_aux_sends: 4,
        num_fx_sends: 4,
        channels_per_page: 16,
    };
}

impl Default for SurfaceDescriptor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub use self::{
    gesture::{
        nudge, ControlGeometry, GestureController, GestureIntent, PointerSample,
        DOUBLE_PRESS_WINDOW, NUDGE_STEP_DB,
    },
    page::{PageSelector, SecondaryParameter},
    strip::{ChannelStrip, ParamValue, StripParameter},
    sync::{
        GetMessage, GetReply, PushMessage, QueryId, RenderRequest, RenderSink, SendError,
        SendResult, SetMessage, Setting, SyncEngine, Transport, WireValue, GET_EVENT_NAME,
        PUSH_EVENT_NAME,
    },
    taper::{db_to_position, position_to_db, DB_MAX, DB_MIN, FADER_TICKS_DB},
    value::{
        console_level_to_db, db_to_console_level, format_db, pan_to_position, pan_to_slide,
        position_to_native_pan, slide_to_native_pan, tick_positions, PAN_CENTER, PAN_MAX, PAN_MIN,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_number_round_trip() {
        let index = ChannelIndex::new(2);
        assert_eq!(3, index.channel_number());
        assert_eq!(
            Some(index),
            ChannelIndex::from_channel_number(index.channel_number())
        );
        assert_eq!(None, ChannelIndex::from_channel_number(0));
    }

    #[test]
    fn send_index_bounds() {
        assert_eq!(None, SendIndex::new(0));
        assert_eq!(None, SendIndex::new(5));
        assert_eq!(0, SendIndex::new(1).unwrap().to_array_index());
        assert_eq!(3, SendIndex::new(4).unwrap().to_array_index());
    }
}
