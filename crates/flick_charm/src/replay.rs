//! Synthetic event replay
//!
//! A tap that never turned into a drag has to reach the surface as an
//! ordinary click. The engine cannot deliver events itself, so it queues
//! a synthetic press/release pair here and the host drains the queue before
//! handling newer input, feeding each event back through the filter.

use std::collections::VecDeque;

use flick_core::{Event, EventOrigin, SyntheticId};
use smallvec::SmallVec;

/// FIFO of events waiting to be re-delivered by the host
#[derive(Debug, Default)]
pub struct SyntheticQueue {
    pending: VecDeque<Event>,
    next_id: u64,
}

impl SyntheticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `event` as synthetic and queue it, returning its id
    pub fn push(&mut self, event: Event) -> SyntheticId {
        self.next_id += 1;
        let id = SyntheticId(self.next_id);
        self.pending
            .push_back(event.with_origin(EventOrigin::Synthetic(id)));
        id
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> std::collections::vec_deque::Drain<'_, Event> {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Replayed events a surface must let through once, untouched
#[derive(Debug, Default, Clone)]
pub struct IgnoreSet {
    ids: SmallVec<[SyntheticId; 2]>,
}

impl IgnoreSet {
    pub fn insert(&mut self, id: SyntheticId) {
        self.ids.push(id);
    }

    /// Remove `id` if present; true when it was
    pub fn take(&mut self, id: SyntheticId) -> bool {
        match self.ids.iter().position(|&ignored| ignored == id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move every id from `other` into this set
    pub fn absorb(&mut self, other: IgnoreSet) {
        self.ids.extend(other.ids);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flick_core::events::event_types::{POINTER_DOWN, POINTER_UP};
    use flick_core::events::{PointerButton, SurfaceId};
    use flick_core::Point;

    fn tap(event_type: u32) -> Event {
        Event::pointer(event_type, SurfaceId(1), Point::new(5, 5), PointerButton::Primary)
    }

    #[test]
    fn test_queue_preserves_order_and_tags() {
        let mut queue = SyntheticQueue::new();
        let first = queue.push(tap(POINTER_DOWN));
        let second = queue.push(tap(POINTER_UP));
        assert_ne!(first, second);
        assert_eq!(queue.len(), 2);

        let drained: Vec<Event> = queue.drain().collect();
        assert!(queue.is_empty());
        assert_eq!(drained[0].event_type, POINTER_DOWN);
        assert_eq!(drained[0].origin, EventOrigin::Synthetic(first));
        assert_eq!(drained[1].event_type, POINTER_UP);
        assert_eq!(drained[1].origin, EventOrigin::Synthetic(second));
    }

    #[test]
    fn test_ignore_set_removes_exactly_once() {
        let mut ignored = IgnoreSet::default();
        ignored.insert(SyntheticId(1));
        ignored.insert(SyntheticId(2));

        assert!(ignored.take(SyntheticId(2)));
        assert!(!ignored.take(SyntheticId(2)));
        assert!(!ignored.take(SyntheticId(7)));
        assert_eq!(ignored.len(), 1);
        assert!(ignored.take(SyntheticId(1)));
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_absorb() {
        let mut a = IgnoreSet::default();
        let mut b = IgnoreSet::default();
        a.insert(SyntheticId(1));
        b.insert(SyntheticId(2));
        a.absorb(b);
        assert_eq!(a.len(), 2);
    }
}
