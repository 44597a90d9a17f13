//! Byte-level transport trait.

use core::future::Future;

/// Async trait for a bidirectional PS/2 byte transport.
///
/// This trait abstracts the wire engine, allowing the real
/// interrupt-driven port and host-side mocks to be used
/// interchangeably by the sequencer and the bridge.
///
/// Neither direction carries an error: the engine below recovers from
/// line faults on its own and simply never delivers a corrupt byte.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ByteLink {
    /// Allow or inhibit reception. While inhibited the device is
    /// clamped and cannot clock anything out.
    fn enable_receive(&mut self, enable: bool);

    /// Take the oldest received byte without waiting, if one is queued.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Wait for and take the next received byte.
    fn recv_byte(&mut self) -> impl Future<Output = u8>;

    /// Send one byte to the device, completing once the transmit
    /// sequence has finished or been abandoned by the watchdog.
    fn send_byte(&mut self, byte: u8) -> impl Future<Output = ()>;
}
