use std::collections::VecDeque;

/// Bounded keystroke queue drained into `PressKey` commands each frame.
///
/// Overflow is dropped silently: a host feeding keys faster than the frame
/// loop consumes them loses the excess rather than stalling the simulation.
#[derive(Debug)]
pub(crate) struct InputQueue {
    keys: VecDeque<char>,
    capacity: usize,
}

impl InputQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            keys: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn push(&mut self, key: char) {
        if self.keys.len() < self.capacity {
            self.keys.push_back(key);
        }
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = char> + '_ {
        self.keys.drain(..)
    }
}
