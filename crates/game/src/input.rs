//! Input sources and per-source coalescing mailboxes
//!
//! Each source owns a single-slot mailbox. Posting into a full slot
//! overwrites it: the consumer only ever cares that *a* press happened since
//! it last looked, not how many.

/// Debounced digital inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Source {
    /// Button A (GPIO5): pause / resume
    ButtonA,
    /// Button B (GPIO6): reset
    ButtonB,
    /// Joystick push switch (GPIO22): confirm click
    JoystickConfirm,
}

impl Source {
    /// All sources.
    pub const ALL: [Self; 3] = [Self::ButtonA, Self::ButtonB, Self::JoystickConfirm];

    const fn index(self) -> usize {
        match self {
            Self::ButtonA => 0,
            Self::ButtonB => 1,
            Self::JoystickConfirm => 2,
        }
    }
}

/// Sources whose action runs when the debounce window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Pause / resume
    A,
    /// Reset
    B,
}

impl From<Button> for Source {
    fn from(button: Button) -> Self {
        match button {
            Button::A => Self::ButtonA,
            Button::B => Self::ButtonB,
        }
    }
}

impl TryFrom<Source> for Button {
    type Error = Source;

    fn try_from(source: Source) -> Result<Self, Self::Error> {
        match source {
            Source::ButtonA => Ok(Self::A),
            Source::ButtonB => Ok(Self::B),
            Source::JoystickConfirm => Err(source),
        }
    }
}

/// An accepted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    /// Which input fired
    pub source: Source,
    /// Game tick count when the edge was accepted
    pub observed_at_tick: u32,
}

/// Capacity-1 overwrite mailbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mailbox {
    slot: Option<InputEvent>,
}

impl Mailbox {
    /// Empty mailbox.
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Store `event`, returning the one it replaced.
    pub fn post(&mut self, event: InputEvent) -> Option<InputEvent> {
        self.slot.replace(event)
    }

    /// Remove and return the pending event.
    pub fn take(&mut self) -> Option<InputEvent> {
        self.slot.take()
    }

    /// True while an event waits.
    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }
}

/// One mailbox per [`Source`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mailboxes {
    boxes: [Mailbox; 3],
}

impl Mailboxes {
    /// All empty.
    pub const fn new() -> Self {
        Self {
            boxes: [Mailbox::new(); 3],
        }
    }

    /// Post to the event's own source mailbox.
    pub fn post(&mut self, event: InputEvent) -> Option<InputEvent> {
        self.boxes
            .get_mut(event.source.index())
            .and_then(|b| b.post(event))
    }

    /// Take the pending event for `source`.
    pub fn take(&mut self, source: Source) -> Option<InputEvent> {
        self.boxes.get_mut(source.index()).and_then(Mailbox::take)
    }

    /// True while `source` has an event waiting.
    pub fn is_pending(&self, source: Source) -> bool {
        self.boxes
            .get(source.index())
            .is_some_and(Mailbox::is_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(source: Source, tick: u32) -> InputEvent {
        InputEvent {
            source,
            observed_at_tick: tick,
        }
    }

    #[test]
    fn post_overwrites_and_reports_previous() {
        let mut m = Mailbox::new();
        assert_eq!(m.post(event(Source::JoystickConfirm, 1)), None);
        assert_eq!(
            m.post(event(Source::JoystickConfirm, 2)),
            Some(event(Source::JoystickConfirm, 1))
        );
        assert_eq!(m.take(), Some(event(Source::JoystickConfirm, 2)));
        assert_eq!(m.take(), None);
    }

    #[test]
    fn sources_do_not_share_slots() {
        let mut boxes = Mailboxes::new();
        boxes.post(event(Source::ButtonA, 3));
        assert!(boxes.is_pending(Source::ButtonA));
        assert!(!boxes.is_pending(Source::ButtonB));
        assert!(!boxes.is_pending(Source::JoystickConfirm));
        assert_eq!(boxes.take(Source::ButtonB), None);
        assert_eq!(boxes.take(Source::ButtonA), Some(event(Source::ButtonA, 3)));
    }

    #[test]
    fn button_source_round_trip() {
        assert_eq!(Button::try_from(Source::from(Button::B)), Ok(Button::B));
        assert!(Button::try_from(Source::JoystickConfirm).is_err());
    }
}
