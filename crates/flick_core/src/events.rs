//! Input events
//!
//! The event record a host toolkit hands to gesture filters. Events are
//! addressed to a [`SurfaceId`] and tagged with an [`EventOrigin`] so that
//! events replayed by a filter can be told apart from real user input.

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const KEY_DOWN: EventType = 20;
    /// Wheel or trackpad scroll
    pub const SCROLL: EventType = 30;
    /// Inertial motion came to rest (timer driven, never sent by a host)
    pub const SETTLE: EventType = 33;

    /// True for the three event types a drag gesture is built from
    pub const fn is_pointer_button_or_motion(event_type: EventType) -> bool {
        matches!(event_type, POINTER_DOWN | POINTER_UP | POINTER_MOVE)
    }
}

/// Host-assigned identity of a scrollable surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Identity of an event re-injected by a filter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SyntheticId(pub u64);

/// Where an event came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventOrigin {
    /// Real input delivered by the host
    #[default]
    User,
    /// Replayed by a filter; must be recognised when it comes back around
    Synthetic(SyntheticId),
}

/// A single pointer button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, or the single touch contact
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Set of pointer buttons held down
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PointerButtons {
    bits: u8,
}

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons { bits: 0 };
    pub const PRIMARY: PointerButtons = PointerButtons { bits: 0b001 };
    pub const SECONDARY: PointerButtons = PointerButtons { bits: 0b010 };
    pub const MIDDLE: PointerButtons = PointerButtons { bits: 0b100 };

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b111 }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn contains(&self, button: PointerButton) -> bool {
        self.bits & Self::from_button(button).bits != 0
    }

    pub const fn with(self, button: PointerButton) -> Self {
        Self {
            bits: self.bits | Self::from_button(button).bits,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    const fn from_button(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::PRIMARY,
            PointerButton::Secondary => Self::SECONDARY,
            PointerButton::Middle => Self::MIDDLE,
        }
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        PointerButtons::from_button(button)
    }
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000; // Cmd on macOS, Win on Windows

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    /// Check if any modifier is pressed
    pub const fn any(&self) -> bool {
        self.bits != 0
    }
}

/// Virtual key code (platform-agnostic)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const SPACE: KeyCode = KeyCode(0x20);
}

/// A UI event addressed to one surface
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub target: SurfaceId,
    pub data: EventData,
    pub origin: EventOrigin,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        /// Position relative to the target surface
        position: Point,
        /// Position on screen; tracks the cursor even when the surface scrolls
        screen_position: Point,
        /// Button that changed state (for move events, the dragging button)
        button: PointerButton,
        /// Buttons held after this event
        buttons: PointerButtons,
        modifiers: Modifiers,
    },
    Key {
        key: KeyCode,
        modifiers: Modifiers,
        repeat: bool,
    },
    Scroll {
        delta_x: f32,
        delta_y: f32,
    },
    None,
}

impl Event {
    /// Create a user pointer event.
    ///
    /// The screen position starts out equal to the local position and the
    /// held buttons follow the event type: `button` is held after a press or
    /// during a move, and nothing is held after a release.
    pub fn pointer(
        event_type: EventType,
        target: SurfaceId,
        position: Point,
        button: PointerButton,
    ) -> Self {
        let buttons = if event_type == event_types::POINTER_UP {
            PointerButtons::NONE
        } else {
            PointerButtons::from(button)
        };
        Self {
            event_type,
            target,
            data: EventData::Pointer {
                position,
                screen_position: position,
                button,
                buttons,
                modifiers: Modifiers::NONE,
            },
            origin: EventOrigin::User,
        }
    }

    /// Create a key event
    pub fn key(event_type: EventType, target: SurfaceId, key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            event_type,
            target,
            data: EventData::Key {
                key,
                modifiers,
                repeat: false,
            },
            origin: EventOrigin::User,
        }
    }

    /// Create a wheel/trackpad scroll event
    pub fn scroll(target: SurfaceId, delta_x: f32, delta_y: f32) -> Self {
        Self {
            event_type: event_types::SCROLL,
            target,
            data: EventData::Scroll { delta_x, delta_y },
            origin: EventOrigin::User,
        }
    }

    pub fn with_screen_position(mut self, screen: Point) -> Self {
        if let EventData::Pointer {
            screen_position, ..
        } = &mut self.data
        {
            *screen_position = screen;
        }
        self
    }

    pub fn with_modifiers(mut self, new_modifiers: Modifiers) -> Self {
        match &mut self.data {
            EventData::Pointer { modifiers, .. } | EventData::Key { modifiers, .. } => {
                *modifiers = new_modifiers;
            }
            _ => {}
        }
        self
    }

    pub fn with_buttons(mut self, held: PointerButtons) -> Self {
        if let EventData::Pointer { buttons, .. } = &mut self.data {
            *buttons = held;
        }
        self
    }

    pub fn with_origin(mut self, origin: EventOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.data, EventData::Pointer { .. })
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.origin, EventOrigin::Synthetic(_))
    }

    pub fn pointer_position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { position, .. } => Some(position),
            _ => None,
        }
    }

    pub fn screen_position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer {
                screen_position, ..
            } => Some(screen_position),
            _ => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self.data {
            EventData::Pointer { modifiers, .. } | EventData::Key { modifiers, .. } => modifiers,
            _ => Modifiers::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::event_types::*;
    use super::*;

    #[test]
    fn test_pointer_buttons_follow_event_type() {
        let id = SurfaceId(3);
        let down = Event::pointer(POINTER_DOWN, id, Point::new(1, 2), PointerButton::Primary);
        let up = Event::pointer(POINTER_UP, id, Point::new(1, 2), PointerButton::Primary);

        match down.data {
            EventData::Pointer { buttons, .. } => assert_eq!(buttons, PointerButtons::PRIMARY),
            _ => panic!("expected pointer data"),
        }
        match up.data {
            EventData::Pointer { buttons, .. } => assert!(buttons.is_empty()),
            _ => panic!("expected pointer data"),
        }
    }

    #[test]
    fn test_builders() {
        let ev = Event::pointer(POINTER_MOVE, SurfaceId(1), Point::new(5, 5), PointerButton::Primary)
            .with_screen_position(Point::new(105, 205))
            .with_modifiers(Modifiers::new(true, false, false, false));

        assert_eq!(ev.pointer_position(), Some(Point::new(5, 5)));
        assert_eq!(ev.screen_position(), Some(Point::new(105, 205)));
        assert!(ev.modifiers().shift());
        assert!(!ev.is_synthetic());

        let replay = ev.with_origin(EventOrigin::Synthetic(SyntheticId(9)));
        assert!(replay.is_synthetic());
    }

    #[test]
    fn test_non_pointer_events() {
        let key = Event::key(KEY_DOWN, SurfaceId(1), KeyCode::SPACE, Modifiers::NONE);
        assert!(!key.is_pointer());
        assert_eq!(key.pointer_position(), None);

        let wheel = Event::scroll(SurfaceId(1), 0.0, -12.0);
        assert_eq!(wheel.event_type, SCROLL);
        assert_eq!(wheel.modifiers(), Modifiers::NONE);
    }

    #[test]
    fn test_button_sets() {
        let held = PointerButtons::PRIMARY.with(PointerButton::Secondary);
        assert!(held.contains(PointerButton::Primary));
        assert!(held.contains(PointerButton::Secondary));
        assert!(!held.contains(PointerButton::Middle));
        assert_ne!(held, PointerButtons::PRIMARY);
        assert_eq!(PointerButtons::from_bits(0xFF).bits(), 0b111);
    }

    #[test]
    fn test_gesture_event_types() {
        assert!(is_pointer_button_or_motion(POINTER_DOWN));
        assert!(is_pointer_button_or_motion(POINTER_MOVE));
        assert!(is_pointer_button_or_motion(POINTER_UP));
        assert!(!is_pointer_button_or_motion(POINTER_ENTER));
        assert!(!is_pointer_button_or_motion(SCROLL));
    }
}
