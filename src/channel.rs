//! Bounded event mailbox for `no_std` targets.
//!
//! Button interrupts (or a polling task) push events, the frame scheduler
//! drains them once per tick. Built on `critical-section` and
//! `heapless::Deque`, so it can be shared from a `static`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// The mailbox is full; carries the event back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// The mailbox is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// A bounded, interrupt-safe queue of events.
pub struct EventChannel<T, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> EventChannel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers; any number may coexist.
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Handle for the consumer.
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Queue an event, or hand it back if the mailbox is full.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(value).map_err(TrySendError)
        })
    }

    /// Take the oldest event.
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued event.
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().clear());
    }
}

impl<T, const SIZE: usize> Default for EventChannel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of an [`EventChannel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a EventChannel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }
}

/// Consumer handle of an [`EventChannel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a EventChannel<T, SIZE>,
}

impl<'a, T, const SIZE: usize> Receiver<'a, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    /// Iterate over the events queued right now, oldest first.
    pub fn drain(&self) -> Drain<'a, T, SIZE> {
        Drain {
            channel: self.channel,
        }
    }
}

/// Iterator returned by [`Receiver::drain`].
pub struct Drain<'a, T, const SIZE: usize> {
    channel: &'a EventChannel<T, SIZE>,
}

impl<T, const SIZE: usize> Iterator for Drain<'_, T, SIZE> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.channel.try_receive().ok()
    }
}
