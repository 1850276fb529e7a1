// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashMap;

use super::{
    message::param_value_from_wire, GetMessage, GetReply, PushMessage, QueryId, RenderRequest,
    RenderSink, SetMessage, Transport,
};
use crate::{
    page::{PageSelector, SecondaryParameter},
    strip::{ChannelStrip, ParamValue, StripParameter},
    ChannelIndex, SurfaceDescriptor,
};

/// Synchronizes the per-channel strip state with the console.
///
/// Owns the strips and the page selector; talks to the outside world only
/// through the [`Transport`] it was built with and the [`RenderSink`]
/// passed into each mutating call. All methods run on the single UI
/// thread.
#[derive(Debug)]
pub struct SyncEngine<T> {
    descriptor: SurfaceDescriptor,
    transport: T,
    strips: Vec<ChannelStrip>,
    page: PageSelector,
    pending_queries: HashMap<QueryId, (ChannelIndex, StripParameter)>,
    next_query: QueryId,
}

impl<T: Transport> SyncEngine<T> {
    #[must_use]
    pub fn new(descriptor: SurfaceDescriptor, transport: T) -> Self {
        let strips = (0..usize::from(descriptor.num_channels))
            .map(|index| ChannelStrip::new(ChannelIndex::new(index)))
            .collect();
        let page = PageSelector::new(&descriptor);
        Self {
            descriptor,
            transport,
            strips,
            page,
            pending_queries: HashMap::new(),
            next_query: QueryId::FIRST,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub const fn page(&self) -> &PageSelector {
        &self.page
    }

    #[must_use]
    pub fn strip(&self, channel: ChannelIndex) -> Option<&ChannelStrip> {
        self.strips.get(channel.to_usize())
    }

    pub fn strips(&self) -> impl Iterator<Item = (ChannelIndex, &ChannelStrip)> {
        self.strips
            .iter()
            .enumerate()
            .map(|(index, strip)| (ChannelIndex::new(index), strip))
    }

    /// Relabel a strip. Labels are persisted externally and never
    /// synchronized.
    pub fn set_display_name(&mut self, channel: ChannelIndex, display_name: impl Into<String>) {
        if let Some(strip) = self.strips.get_mut(channel.to_usize()) {
            strip.set_display_name(display_name);
        }
    }

    /// Pull the current console state for every channel and every tracked
    /// parameter.
    ///
    /// Each query carries a fresh tag; replies arrive through
    /// [`Self::handle_reply`] as remote-origin writes. Failed sends are
    /// logged and skipped, leaving those controls at their initialization
    /// defaults until the console pushes them.
    pub fn connect(&mut self) {
        let mut queries = 0usize;
        let mut failures = 0usize;
        for index in 0..self.strips.len() {
            let channel = ChannelIndex::new(index);
            for parameter in StripParameter::tracked(&self.descriptor) {
                let query = self.allocate_query();
                self.pending_queries.insert(query, (channel, parameter));
                let message = GetMessage::new(channel, parameter, query);
                queries += 1;
                if let Err(err) = self.transport.send_get(&message) {
                    log::warn!("Failed to query {parameter:?} of channel {channel}: {err}");
                    self.pending_queries.remove(&query);
                    failures += 1;
                }
            }
        }
        log::info!(
            "Queried console state: {sent} queries, {failures} failed",
            sent = queries - failures
        );
    }

    /// Apply a user-originated change.
    ///
    /// When the stored value changes, requests a redraw and pushes the
    /// fully-resolved domain value to the console. An unchanged value does
    /// neither. A failed send is logged; the optimistic local write
    /// stands.
    pub fn set_local(
        &mut self,
        channel: ChannelIndex,
        parameter: StripParameter,
        value: ParamValue,
        renderer: &mut impl RenderSink,
    ) {
        let Some(strip) = self.strips.get_mut(channel.to_usize()) else {
            debug_assert!(false, "no strip for channel {channel}");
            return;
        };
        if !strip.set(parameter, value) {
            return;
        }
        self.render_if_visible(channel, parameter, renderer);

        // Push the clamped value as stored, not the raw input.
        let value = self.strips[channel.to_usize()].get(parameter);
        let message = SetMessage::new(channel, parameter, value);
        if let Err(err) = self.transport.send_set(&message) {
            log::warn!("Failed to push {parameter:?} of channel {channel}: {err}");
        }
    }

    /// Reset a parameter to its default value, as a local-origin write.
    ///
    /// This is the double-press target: 0 dB for levels, center for pan.
    pub fn reset_to_default(
        &mut self,
        channel: ChannelIndex,
        parameter: StripParameter,
        renderer: &mut impl RenderSink,
    ) {
        self.set_local(channel, parameter, parameter.default_value(), renderer);
    }

    /// Apply a console-originated change.
    ///
    /// Always requests a redraw, even for an unchanged value, and never
    /// produces an outbound message.
    pub fn apply_remote(
        &mut self,
        channel: ChannelIndex,
        parameter: StripParameter,
        value: ParamValue,
        renderer: &mut impl RenderSink,
    ) {
        let Some(strip) = self.strips.get_mut(channel.to_usize()) else {
            log::debug!("Dropping remote write for unknown channel {channel}");
            return;
        };
        strip.set(parameter, value);
        self.render_if_visible(channel, parameter, renderer);
    }

    /// Dispatch an unsolicited push from the console.
    ///
    /// Mistargeted or malformed pushes are dropped silently: the transport
    /// broadcasts and every receiver self-filters.
    pub fn handle_push(&mut self, push: &PushMessage, renderer: &mut impl RenderSink) {
        let Some(channel) = ChannelIndex::from_channel_number(push.channel_number) else {
            log::debug!("Dropping push for invalid channel number 0");
            return;
        };
        if channel.to_usize() >= self.strips.len() {
            log::debug!(
                "Dropping push for channel number {channel_number} beyond the surface",
                channel_number = push.channel_number
            );
            return;
        }
        let Some(parameter) = push.strip_parameter() else {
            log::debug!(
                "Dropping push with undefined setting/parameter combination: {push:?}"
            );
            return;
        };
        let value = param_value_from_wire(parameter, push.value);
        self.apply_remote(channel, parameter, value, renderer);
    }

    /// Apply the reply to a previously issued get query.
    ///
    /// Replies with an unknown tag are dropped silently; a reply consumes
    /// its tag. Out-of-order replies are not reordered, the last applied
    /// value wins.
    pub fn handle_reply(&mut self, reply: &GetReply, renderer: &mut impl RenderSink) {
        let Some((channel, parameter)) = self.pending_queries.remove(&reply.query) else {
            log::debug!("Dropping reply with unknown query tag {}", reply.query);
            return;
        };
        let value = param_value_from_wire(parameter, reply.value);
        self.apply_remote(channel, parameter, value, renderer);
    }

    /// Switch to another 16-channel page and redraw it.
    pub fn select_page(&mut self, page: u8, renderer: &mut impl RenderSink) {
        if self.page.select_page(page) {
            self.render_visible_page(renderer);
        }
    }

    /// Switch the secondary parameter shown on the visible strips and
    /// redraw them.
    pub fn select_secondary(
        &mut self,
        secondary: SecondaryParameter,
        renderer: &mut impl RenderSink,
    ) {
        if self.page.select_secondary(secondary) {
            self.render_visible_page(renderer);
        }
    }

    /// Request redraws for every control on the visible page.
    pub fn render_visible_page(&self, renderer: &mut impl RenderSink) {
        let secondary = self.page.secondary().strip_parameter();
        for channel in self.page.visible_channels() {
            for parameter in [StripParameter::Volume, StripParameter::Mute, secondary] {
                renderer.render(RenderRequest { channel, parameter });
            }
        }
    }

    fn render_if_visible(
        &self,
        channel: ChannelIndex,
        parameter: StripParameter,
        renderer: &mut impl RenderSink,
    ) {
        // Visibility filters rendering only; state writes for hidden
        // channels have already happened by the time we get here.
        if self.page.is_visible(channel) {
            renderer.render(RenderRequest { channel, parameter });
        }
    }

    fn allocate_query(&mut self) -> QueryId {
        let query = self.next_query;
        self.next_query = query.next();
        query
    }
}
