//! Frame accumulator shared by the receive and transmit paths.

/// Shift register, bit counter, and running parity for one 8-bit frame.
///
/// Receive shifts sampled bits into `value`; transmit leaves `value`
/// untouched (the pending byte lives in the engine) and only folds the
/// driven bits into the parity accumulator while counting them down.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    value: u8,
    remaining: u8,
    parity: u8,
}

impl Frame {
    pub(crate) const fn new() -> Self {
        Self {
            value: 0,
            remaining: 0,
            parity: 0,
        }
    }

    /// Start a new frame: 8 data bits, even accumulator.
    pub(crate) fn reset(&mut self) {
        self.value = 0;
        self.remaining = 8;
        self.parity = 0;
    }

    /// Shift one received data bit in. Bits arrive LSB first on the
    /// wire, so each enters at the top of a right-shifting register.
    /// Returns true once all 8 data bits are in.
    pub(crate) fn shift_in(&mut self, bit: bool) -> bool {
        self.value = (self.value >> 1) | ((bit as u8) << 7);
        self.parity ^= bit as u8;
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Fold one transmitted data bit into the parity accumulator.
    /// Returns true once all 8 data bits are counted.
    pub(crate) fn fold_out(&mut self, bit: bool) -> bool {
        self.parity ^= bit as u8;
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Fold the received parity bit in and check the frame. A valid
    /// odd-parity frame leaves the accumulator non-zero; that exact
    /// polarity, not its negation, is what the peripheral guarantees.
    pub(crate) fn parity_valid(&mut self, parity_bit: bool) -> bool {
        self.parity ^= parity_bit as u8;
        self.parity != 0
    }

    /// Parity bit to drive so the transmitted frame carries odd parity:
    /// the inverse of the accumulated data parity.
    pub(crate) fn parity_out(&self) -> bool {
        self.parity & 0x01 == 0
    }

    /// The completed byte.
    pub(crate) fn value(&self) -> u8 {
        self.value
    }
}
