// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! State synchronization between the local control surface and the console.
//!
//! The engine pulls the full console state on connect, pushes local edits
//! optimistically, and applies unsolicited pushes from the console. Write
//! origin is explicit: [`SyncEngine::set_local`] pushes to the transport,
//! [`SyncEngine::apply_remote`] never does, which keeps locally-initiated
//! changes from echoing back as remote ones and vice versa.
//!
//! Delivery, reconnection, and message framing are the transport's
//! responsibility; the engine only speaks typed messages through the
//! [`Transport`] seam and requests redraws through [`RenderSink`].

use std::borrow::Cow;

use thiserror::Error;

use crate::{strip::StripParameter, ChannelIndex};

mod engine;
pub use self::engine::SyncEngine;

mod message;
pub use self::message::{
    GetMessage, GetReply, PushMessage, QueryId, SetMessage, Setting, WireValue, GET_EVENT_NAME,
    PUSH_EVENT_NAME,
};


#[derive(Debug, Error)]
pub enum SendError {
    #[error("Send: {msg}")]
    Send { msg: Cow<'static, str> },
}

pub type SendResult<T> = std::result::Result<T, SendError>;

/// Outbound half of the bidirectional console channel.
///
/// Implementations serialize and deliver messages; they must not loop
/// locally-sent messages back into the inbound path.
pub trait Transport {
    fn send_set(&mut self, message: &SetMessage) -> SendResult<()>;

    fn send_get(&mut self, message: &GetMessage) -> SendResult<()>;
}

/// A request to redraw one control of one channel strip.
///
/// The render surface reads the current value from the engine's strip
/// state; the request only marks what became stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderRequest {
    pub channel: ChannelIndex,
    pub parameter: StripParameter,
}

/// Sink for redraw requests.
pub trait RenderSink {
    fn render(&mut self, request: RenderRequest);
}

/// Collecting sink for tests and simple immediate-mode hosts.
impl RenderSink for Vec<RenderRequest> {
    fn render(&mut self, request: RenderRequest) {
        self.push(request);
    }
}
