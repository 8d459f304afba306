use crate::error::{Error, Result};
use crate::types::StateVector;
use std::collections::VecDeque;

/// Bounded history of recently visited states.
///
/// Entries are kept oldest first. Once `capacity` entries are stored,
/// each [`TrailBuffer::append`] evicts the single oldest one, so
/// `len() <= capacity()` holds after every operation.
///
/// Storage is a [`VecDeque`] that grows on demand up to the capacity, so
/// a large ceiling costs nothing until it is filled.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    entries: VecDeque<StateVector>,
    capacity: usize,
}

impl TrailBuffer {
    /// Creates an empty trail holding at most `capacity` states.
    ///
    /// ### Errors
    /// [`Error::ZeroCapacity`] if `capacity` is `0`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self {
            entries: VecDeque::new(),
            capacity,
        })
    }

    /// Stores a snapshot of `state`, evicting the oldest entry if full.
    pub fn append(&mut self, state: StateVector) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(state);
    }

    /// Changes the capacity.
    ///
    /// Shrinking keeps only the most recent `capacity` entries, still in
    /// chronological order. Growing only raises the ceiling.
    ///
    /// ### Errors
    /// [`Error::ZeroCapacity`] if `capacity` is `0`; the buffer is left untouched.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if self.entries.len() > capacity {
            let excess = self.entries.len() - capacity;
            self.entries.drain(..excess);
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Removes every entry; the capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently appended state.
    pub fn latest(&self) -> Option<&StateVector> {
        self.entries.back()
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &StateVector> + '_ {
        self.entries.iter()
    }

    /// Copies the trail out, oldest first.
    pub fn to_vec(&self) -> Vec<StateVector> {
        self.entries.iter().copied().collect()
    }
}
