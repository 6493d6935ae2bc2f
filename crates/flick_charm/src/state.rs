//! Flick gesture states

use flick_core::events::event_types::*;
use flick_core::events::EventType;
use flick_core::StateTransitions;

/// Per-surface flick state
///
/// ```text
/// Steady --down--> Pressed --move--> ManualScroll --up--> AutoScroll
///    ^                |                  ^  (move)          |    |
///    +------up--------+                  |                  |    down
///    +<---------------------- up / settle -----------------+    v
///    +<---------------------------- up ------------------- Stop
///                                        +------- move -------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlickState {
    /// Nothing going on; a press may start a gesture
    #[default]
    Steady,
    /// Pressed but not moved yet; a release here is an ordinary click
    Pressed,
    /// Offset follows the pointer
    ManualScroll,
    /// Released with momentum; the timer decays the velocity
    AutoScroll,
    /// Momentum cancelled by a press; waiting to see if a drag follows
    Stop,
}

impl FlickState {
    /// States that need the timer running
    pub fn is_moving(&self) -> bool {
        matches!(self, FlickState::ManualScroll | FlickState::AutoScroll)
    }
}

impl StateTransitions for FlickState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (FlickState::Steady, POINTER_DOWN) => Some(FlickState::Pressed),
            (FlickState::Pressed, POINTER_UP) => Some(FlickState::Steady),
            (FlickState::Pressed, POINTER_MOVE) => Some(FlickState::ManualScroll),
            (FlickState::ManualScroll, POINTER_MOVE) => Some(FlickState::ManualScroll),
            (FlickState::ManualScroll, POINTER_UP) => Some(FlickState::AutoScroll),
            (FlickState::AutoScroll, POINTER_DOWN) => Some(FlickState::Stop),
            (FlickState::AutoScroll, POINTER_UP) => Some(FlickState::Steady),
            (FlickState::AutoScroll, SETTLE) => Some(FlickState::Steady),
            (FlickState::Stop, POINTER_UP) => Some(FlickState::Steady),
            (FlickState::Stop, POINTER_MOVE) => Some(FlickState::ManualScroll),
            _ => None,
        }
    }
}
