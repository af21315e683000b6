//! Command tag allocation.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::Tag;

const FIRST: u32 = 1;

/// Hands out connection-unique tags: 1, 2, 3, ...
///
/// Shared by reference; allocation is lock-free.
#[derive(Debug)]
pub struct TagGenerator {
    next: AtomicU32,
}

impl TagGenerator {
    /// Creates a generator whose first tag is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU32::new(FIRST),
        }
    }

    /// Takes the next tag.
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` tags have been handed out, instead of wrapping
    /// around to a tag that may still be in flight.
    #[must_use]
    pub fn next(&self) -> Tag {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(n) => Tag::new(n),
            Err(n) => panic!("tag counter overflow at {n}"),
        }
    }

    /// Peeks at the tag [`next`](Self::next) would return.
    #[must_use]
    pub fn current(&self) -> Tag {
        Tag::new(self.next.load(Ordering::Relaxed))
    }

    /// Starts over from 1, e.g. on a fresh connection.
    pub fn reset(&self) {
        self.next.store(FIRST, Ordering::Relaxed);
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TagGenerator {
    fn clone(&self) -> Self {
        Self {
            next: AtomicU32::new(self.next.load(Ordering::Relaxed)),
        }
    }
}
