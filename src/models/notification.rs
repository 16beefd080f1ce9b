//! Notification channel state
//!
//! Each channel holds at most one message. Posting replaces the message and
//! bumps the channel generation, so a dismissal scheduled for an older
//! message no longer applies.

/// Independent message slot with its own display lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Error,
    Success,
}

impl Channel {
    /// CSS class of the element that displays this channel
    pub fn css_class(self) -> &'static str {
        match self {
            Channel::Error => "error-message",
            Channel::Success => "success-message",
        }
    }
}

/// Identifies one posted message; used to dismiss exactly that message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DismissTicket {
    pub channel: Channel,
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ChannelSlot {
    message: Option<String>,
    visible: bool,
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    error: ChannelSlot,
    success: ChannelSlot,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message` on `channel`, replacing whatever was there
    pub fn post(&mut self, channel: Channel, message: impl Into<String>) -> DismissTicket {
        let slot = self.slot_mut(channel);
        slot.generation += 1;
        slot.message = Some(message.into());
        slot.visible = true;
        DismissTicket {
            channel,
            generation: slot.generation,
        }
    }

    /// Hide the message the ticket was issued for.
    ///
    /// Returns false when a newer message has replaced it since, or it is
    /// already hidden. The text is kept; only visibility changes.
    pub fn dismiss(&mut self, ticket: DismissTicket) -> bool {
        let slot = self.slot_mut(ticket.channel);
        if slot.generation != ticket.generation || !slot.visible {
            return false;
        }
        slot.visible = false;
        true
    }

    pub fn is_visible(&self, channel: Channel) -> bool {
        self.slot(channel).visible
    }

    /// Last message posted on the channel, visible or not
    pub fn message(&self, channel: Channel) -> Option<&str> {
        self.slot(channel).message.as_deref()
    }

    fn slot(&self, channel: Channel) -> &ChannelSlot {
        match channel {
            Channel::Error => &self.error,
            Channel::Success => &self.success,
        }
    }

    fn slot_mut(&mut self, channel: Channel) -> &mut ChannelSlot {
        match channel {
            Channel::Error => &mut self.error,
            Channel::Success => &mut self.success,
        }
    }
}
