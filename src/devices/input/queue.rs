//! Fixed-capacity circular event queue.
//!
//! One slot always stays free so that `head == tail` means empty and
//! `(tail + 1) % CAPACITY == head` means full; the queue holds at most
//! `EVENT_QUEUE_CAPACITY - 1` events.

use super::events::Event;
use crate::config::EVENT_QUEUE_CAPACITY;

pub struct EventQueue {
    slots: [Event; EVENT_QUEUE_CAPACITY],
    head: usize,
    tail: usize,
    dropped: u32,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            slots: [Event::Redraw; EVENT_QUEUE_CAPACITY],
            head: 0,
            tail: 0,
            dropped: 0,
        }
    }

    /// Append an event. A full queue drops it and returns `false`.
    pub fn push(&mut self, event: Event) -> bool {
        let next = (self.tail + 1) % EVENT_QUEUE_CAPACITY;
        if next == self.head {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        self.slots[self.tail] = event;
        self.tail = next;
        true
    }

    pub fn pop(&mut self) -> Option<Event> {
        if self.is_empty() {
            return None;
        }
        let event = self.slots[self.head];
        self.head = (self.head + 1) % EVENT_QUEUE_CAPACITY;
        Some(event)
    }

    pub fn len(&self) -> usize {
        (self.tail + EVENT_QUEUE_CAPACITY - self.head) % EVENT_QUEUE_CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        (self.tail + 1) % EVENT_QUEUE_CAPACITY == self.head
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Events lost to overflow since creation.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: u8) -> Event {
        Event::KeyUp { code }
    }

    #[test]
    fn holds_at_most_capacity_minus_one() {
        let mut q = EventQueue::new();
        for i in 0..EVENT_QUEUE_CAPACITY - 1 {
            assert!(q.push(key(i as u8)));
        }
        assert!(q.is_full());
        assert!(!q.push(key(0xFF)));
        assert_eq!(q.len(), EVENT_QUEUE_CAPACITY - 1);
        assert_eq!(q.dropped(), 1);

        // The rejected event never shows up.
        for i in 0..EVENT_QUEUE_CAPACITY - 1 {
            assert_eq!(q.pop(), Some(key(i as u8)));
        }
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn pop_on_empty_leaves_queue_untouched() {
        let mut q = EventQueue::new();
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert!(q.push(Event::Redraw));
        assert_eq!(q.pop(), Some(Event::Redraw));
    }

    #[test]
    fn wraps_around_the_slot_array() {
        let mut q = EventQueue::new();
        for round in 0..3 * EVENT_QUEUE_CAPACITY {
            assert!(q.push(key(round as u8)));
            assert!(q.push(key(round as u8 ^ 0x80)));
            assert_eq!(q.pop(), Some(key(round as u8)));
            assert_eq!(q.pop(), Some(key(round as u8 ^ 0x80)));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn clear_empties_without_touching_the_drop_count() {
        let mut q = EventQueue::new();
        while q.push(Event::Redraw) {}
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.dropped(), 1);
    }
}
