//! Serial packet sink trait and error types.

use core::future::Future;
use serial_proto::SerialPacket;

/// Error type for sink operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// UART/communication I/O error.
    Io,
    /// Device not ready (e.g., port not opened by the host).
    NotReady,
}

/// Async trait for serial mouse packet sinks.
///
/// This trait abstracts the destination for converted packets, enabling
/// different output methods (hardware UART, USB CDC, host test capture).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait PacketSink {
    /// Send one packet to the output.
    ///
    /// May block until the previous packet has been sent.
    fn send(&mut self, packet: &SerialPacket) -> impl Future<Output = Result<(), SinkError>>;

    /// Check if the output is ready to accept data.
    fn is_ready(&self) -> bool;
}
