//! Fixed-capacity receive ring: single producer (the engine on frame
//! completion), single consumer (the polling caller).

/// Number of slots in the receive ring. One slot is sacrificed to the
/// empty test, so up to `RX_BUFFER_LEN - 1` bytes can be buffered.
pub const RX_BUFFER_LEN: usize = 8;

#[derive(Debug)]
pub(crate) struct RxRing {
    buf: [u8; RX_BUFFER_LEN],
    head: usize,
    tail: usize,
}

impl RxRing {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; RX_BUFFER_LEN],
            head: 0,
            tail: 0,
        }
    }

    /// Enqueue a completed byte.
    ///
    /// There is deliberately no full check (no backpressure): if the
    /// consumer falls `RX_BUFFER_LEN - 1` bytes behind, `head` meets
    /// `tail` and the reader observes an empty ring until the producer
    /// laps it. Callers drain faster than a pointing device reports.
    pub(crate) fn push(&mut self, byte: u8) {
        self.buf[self.head] = byte;
        self.head = (self.head + 1) % RX_BUFFER_LEN;
    }

    pub(crate) fn available(&self) -> bool {
        self.head != self.tail
    }

    /// Remove and return the oldest buffered byte.
    pub(crate) fn take(&mut self) -> Option<u8> {
        if self.head == self.tail {
            return None;
        }
        let byte = self.buf[self.tail];
        self.tail = (self.tail + 1) % RX_BUFFER_LEN;
        Some(byte)
    }
}
