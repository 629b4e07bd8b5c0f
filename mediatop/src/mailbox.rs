//! Single-slot, overwrite-on-publish, non-blocking-take channel.

use std::sync::Mutex;

/// Latest-value mailbox. A newer publish unconditionally replaces an unread
/// older one; the reader only ever sees the most recent value or nothing.
///
/// Both sides hold the lock only for a `T` copy, which stands in for the
/// indivisible-copy primitive the design asks for.
pub struct Mailbox<T: Copy> {
    slot: Mutex<Option<T>>,
}

impl<T: Copy> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub fn publish(&self, value: T) {
        *self.slot.lock().unwrap() = Some(value);
    }

    pub fn try_take(&self) -> Option<T> {
        self.slot.lock().unwrap().take()
    }
}

impl<T: Copy> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}
