// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! Typed wire messages of the console protocol.
//!
//! Channels are addressed 1-based on the wire. Aux/fx messages carry their
//! 1-based sub-index as a string, all other settings an empty string.
//! Levels travel in decibels, pan in console-native units, mute as 0/1.

use serde::{Deserialize, Serialize};

use crate::{
    strip::{ParamValue, StripParameter},
    ChannelIndex, SendIndex,
};

/// Event name outbound queries are emitted under.
pub const GET_EVENT_NAME: &str = "get";

/// Event name the console pushes unsolicited state changes under.
pub const PUSH_EVENT_NAME: &str = "midi";

/// Setting name, doubling as the outbound set event name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Setting {
    Vol,
    Mute,
    Pan,
    Aux,
    Fx,
}

/// Tag correlating a get query with its asynchronous reply.
///
/// Every outbound query carries a fresh tag and the reply echoes it, so
/// concurrent queries for different sub-parameters cannot be misattributed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[repr(transparent)]
pub struct QueryId(u32);

impl QueryId {
    pub const FIRST: Self = Self(0);

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Inbound value: the console sends levels as numbers and switch states
/// as either booleans or 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Switch(bool),
    Number(f64),
}

impl WireValue {
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Switch(on) => f64::from(u8::from(on)),
            Self::Number(number) => number,
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        match self {
            Self::Switch(on) => on,
            Self::Number(number) => number != 0.0,
        }
    }
}

/// Outbound state change, emitted under the event name in `setting`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetMessage {
    /// Event name; not part of the payload.
    #[serde(skip_serializing)]
    pub setting: Setting,

    #[serde(rename = "channel")]
    pub channel_number: u16,

    #[serde(with = "send_parameter")]
    pub parameter: Option<SendIndex>,

    pub value: f64,
}

impl SetMessage {
    /// Build the outbound message for a local parameter change.
    #[must_use]
    pub fn new(channel: ChannelIndex, parameter: StripParameter, value: ParamValue) -> Self {
        let (setting, send) = split_parameter(parameter);
        Self {
            setting,
            channel_number: channel.channel_number(),
            parameter: send,
            value: wire_value(value),
        }
    }
}

/// Outbound state query, emitted under [`GET_EVENT_NAME`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GetMessage {
    #[serde(rename = "channel")]
    pub channel_number: u16,

    pub setting: Setting,

    #[serde(with = "send_parameter")]
    pub parameter: Option<SendIndex>,

    pub query: QueryId,
}

impl GetMessage {
    #[must_use]
    pub fn new(channel: ChannelIndex, parameter: StripParameter, query: QueryId) -> Self {
        let (setting, send) = split_parameter(parameter);
        Self {
            channel_number: channel.channel_number(),
            setting,
            parameter: send,
            query,
        }
    }
}

/// Asynchronous reply to a [`GetMessage`], correlated by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GetReply {
    pub query: QueryId,

    pub value: WireValue,
}

/// Unsolicited state change pushed by the console under
/// [`PUSH_EVENT_NAME`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "channelNumber")]
    pub channel_number: u16,

    pub setting: Setting,

    #[serde(default, with = "send_parameter")]
    pub parameter: Option<SendIndex>,

    pub value: WireValue,
}

impl PushMessage {
    /// The strip parameter this push addresses.
    ///
    /// `None` for combinations the protocol does not define, e.g. an
    /// aux/fx push without its sub-index.
    #[must_use]
    pub const fn strip_parameter(&self) -> Option<StripParameter> {
        join_parameter(self.setting, self.parameter)
    }
}

/// Map a strip parameter onto its wire setting and sub-index.
const fn split_parameter(parameter: StripParameter) -> (Setting, Option<SendIndex>) {
    match parameter {
        StripParameter::Volume => (Setting::Vol, None),
        StripParameter::Mute => (Setting::Mute, None),
        StripParameter::Pan => (Setting::Pan, None),
        StripParameter::AuxSend(send) => (Setting::Aux, Some(send)),
        StripParameter::FxSend(send) => (Setting::Fx, Some(send)),
    }
}

/// Inverse of [`split_parameter`] for inbound dispatch.
const fn join_parameter(setting: Setting, send: Option<SendIndex>) -> Option<StripParameter> {
    match (setting, send) {
        (Setting::Vol, None) => Some(StripParameter::Volume),
        (Setting::Mute, None) => Some(StripParameter::Mute),
        (Setting::Pan, None) => Some(StripParameter::Pan),
        (Setting::Aux, Some(send)) => Some(StripParameter::AuxSend(send)),
        (Setting::Fx, Some(send)) => Some(StripParameter::FxSend(send)),
        _ => None,
    }
}

/// Fully-resolved domain value as it travels outbound.
fn wire_value(value: ParamValue) -> f64 {
    match value {
        ParamValue::Db(db) => db,
        ParamValue::Switch(on) => f64::from(u8::from(on)),
        ParamValue::Pan(pan) => f64::from(pan),
    }
}

/// Interpret an inbound value for the parameter it addresses.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn param_value_from_wire(parameter: StripParameter, value: WireValue) -> ParamValue {
    match parameter {
        StripParameter::Volume | StripParameter::AuxSend(_) | StripParameter::FxSend(_) => {
            ParamValue::Db(value.to_f64())
        }
        StripParameter::Mute => ParamValue::Switch(value.is_on()),
        StripParameter::Pan => ParamValue::Pan(value.to_f64().round() as i32),
    }
}

/// Aux/fx sub-indices travel as strings (`"1"`..`"4"`), everything else
/// as the empty string.
mod send_parameter {
    use serde::{de::Error as _, Deserialize as _, Deserializer, Serializer};

    use crate::SendIndex;

    pub(super) fn serialize<S>(value: &Option<SendIndex>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(send) => serializer.collect_str(send),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<SendIndex>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        if text.is_empty() {
            return Ok(None);
        }
        let index: u8 = text
            .parse()
            .map_err(|_| D::Error::custom("sub-parameter is not a number"))?;
        SendIndex::new(index)
            .map(Some)
            .ok_or_else(|| D::Error::custom("sub-parameter out of range"))
    }
}
