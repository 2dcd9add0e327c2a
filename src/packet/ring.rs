use std::collections::VecDeque;

use tracing::trace;

use crate::Error;
use crate::Result;

/// Fixed-capacity FIFO of packet handles.
///
/// Never grows past `capacity`: a push into a full ring is refused and the
/// item is dropped.
#[derive(Debug)]
pub struct PacketRing<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> PacketRing<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(
        &mut self,
        item: T,
    ) -> Result<()> {
        if self.is_full() {
            trace!("packet ring full ({} slots)", self.capacity);
            return Err(Error::PacketRingFull);
        }
        self.items.push_back(item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
