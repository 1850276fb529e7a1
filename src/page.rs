// SPDX-FileCopyrightText: The mixio authors
// SPDX-License-Identifier: MPL-2.0

//! Page and secondary-parameter selection.
//!
//! Purely a view concern: the selector decides which channel strips are
//! visible and which secondary control (pan or one of the sends) their
//! slides show. Hidden strips keep receiving and applying remote updates;
//! visibility filters rendering, never data.

use crate::{strip::StripParameter, ChannelIndex, SendIndex, SurfaceDescriptor};

/// The secondary control shown on every visible strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryParameter {
    Pan,
    Aux(SendIndex),
    Fx(SendIndex),
}

impl SecondaryParameter {
    /// The strip parameter the selection maps to.
    #[must_use]
    pub const fn strip_parameter(self) -> StripParameter {
        match self {
            Self::Pan => StripParameter::Pan,
            Self::Aux(send) => StripParameter::AuxSend(send),
            Self::Fx(send) => StripParameter::FxSend(send),
        }
    }
}

/// Selects the visible 16-channel page and the secondary parameter.
///
/// Persistence of the selection is an external concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelector {
    num_channels: u8,
    channels_per_page: u8,
    selected_page: u8,
    secondary: SecondaryParameter,
}

impl PageSelector {
    #[must_use]
    pub fn new(descriptor: &SurfaceDescriptor) -> Self {
        Self {
            num_channels: descriptor.num_channels,
            channels_per_page: descriptor.channels_per_page.max(1),
            selected_page: 1,
            secondary: SecondaryParameter::Pan,
        }
    }

    /// Number of pages, at least 1.
    #[must_use]
    pub const fn page_count(&self) -> u8 {
        let pages = self.num_channels.div_ceil(self.channels_per_page);
        if pages == 0 {
            1
        } else {
            pages
        }
    }

    /// Currently selected page, 1-based.
    #[must_use]
    pub const fn selected_page(&self) -> u8 {
        self.selected_page
    }

    /// Select a page, clamped into the valid range.
    ///
    /// Returns whether the selection changed.
    pub fn select_page(&mut self, page: u8) -> bool {
        let page = page.clamp(1, self.page_count());
        let changed = self.selected_page != page;
        self.selected_page = page;
        changed
    }

    #[must_use]
    pub const fn secondary(&self) -> SecondaryParameter {
        self.secondary
    }

    /// Select the secondary parameter shown on all visible strips.
    ///
    /// Returns whether the selection changed.
    pub fn select_secondary(&mut self, secondary: SecondaryParameter) -> bool {
        let changed = self.secondary != secondary;
        self.secondary = secondary;
        changed
    }

    /// Channel indices on the currently visible page.
    pub fn visible_channels(&self) -> impl Iterator<Item = ChannelIndex> {
        let first = usize::from(self.selected_page - 1) * usize::from(self.channels_per_page);
        let last = (first + usize::from(self.channels_per_page)).min(usize::from(self.num_channels));
        (first..last).map(ChannelIndex::new)
    }

    #[must_use]
    pub fn is_visible(&self, channel: ChannelIndex) -> bool {
        let first = usize::from(self.selected_page - 1) * usize::from(self.channels_per_page);
        let index = channel.to_usize();
        index >= first
            && index < first + usize::from(self.channels_per_page)
            && index < usize::from(self.num_channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_first_page_showing_pan() {
        let selector = PageSelector::new(&SurfaceDescriptor::DEFAULT);
        assert_eq!(1, selector.selected_page());
        assert_eq!(SecondaryParameter::Pan, selector.secondary());
        assert_eq!(4, selector.page_count());
    }

    #[test]
    fn select_page_clamps_into_range() {
        let mut selector = PageSelector::new(&SurfaceDescriptor::DEFAULT);
        assert!(selector.select_page(9));
        assert_eq!(4, selector.selected_page());
        assert!(selector.select_page(0));
        assert_eq!(1, selector.selected_page());
        assert!(!selector.select_page(1));
    }

    #[test]
    fn visible_channels_follow_the_page() {
        let mut selector = PageSelector::new(&SurfaceDescriptor::DEFAULT);
        selector.select_page(2);
        let visible: Vec<_> = selector.visible_channels().collect();
        assert_eq!(16, visible.len());
        assert_eq!(ChannelIndex::new(16), visible[0]);
        assert_eq!(ChannelIndex::new(31), visible[15]);
        assert!(selector.is_visible(ChannelIndex::new(20)));
        assert!(!selector.is_visible(ChannelIndex::new(2)));
        assert!(!selector.is_visible(ChannelIndex::new(32)));
    }

    #[test]
    fn partial_last_page() {
        let descriptor = SurfaceDescriptor {
            num_channels: 20,
            ..SurfaceDescriptor::DEFAULT
        };
        let mut selector = PageSelector::new(&descriptor);
        assert_eq!(2, selector.page_count());
        selector.select_page(2);
        let visible: Vec<_> = selector.visible_channels().collect();
        assert_eq!(4, visible.len());
        assert_eq!(ChannelIndex::new(19), visible[3]);
        assert!(!selector.is_visible(ChannelIndex::new(20)));
    }

    #[test]
    fn secondary_selection_reports_changes() {
        let mut selector = PageSelector::new(&SurfaceDescriptor::DEFAULT);
        let aux1 = SecondaryParameter::Aux(SendIndex::new(1).unwrap());
        assert!(selector.select_secondary(aux1));
        assert!(!selector.select_secondary(aux1));
        assert_eq!(
            StripParameter::AuxSend(SendIndex::new(1).unwrap()),
            aux1.strip_parameter()
        );
    }
}
