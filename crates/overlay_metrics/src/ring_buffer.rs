//! Ring buffer holding the most recent samples

/// Fixed-capacity FIFO window.
///
/// Once full, each push overwrites the oldest sample. Iteration always
/// yields samples oldest first.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
    // Slot the next push writes to once the buffer is full; also the oldest sample.
    index: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer. A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            index: 0,
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.index] = sample;
        }
        self.index = (self.index + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sample at `slot`, counted from the oldest. `None` past the current length.
    pub fn get(&self, slot: usize) -> Option<&T> {
        if slot >= self.samples.len() {
            return None;
        }
        let physical = if self.samples.len() < self.capacity {
            slot
        } else {
            (self.index + slot) % self.capacity
        };
        self.samples.get(physical)
    }

    pub fn latest(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|slot| self.get(slot))
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = if self.samples.len() < self.capacity {
            self.samples.split_at(0)
        } else {
            self.samples.split_at(self.index)
        };
        older.iter().chain(newer.iter())
    }
}
