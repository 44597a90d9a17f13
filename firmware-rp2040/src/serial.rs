//! UART output for serial mouse packets.
//!
//! At 1200 baud a 3-byte packet takes 25 ms on the wire, far longer
//! than any executor pause, so a blocking transmit is simpler than
//! DMA and costs nothing observable.

use embassy_rp::uart::{Blocking, UartTx};
use mouse_core::{PacketSink, SinkError};
use serial_proto::SerialPacket;

/// Packet sink over a blocking UART transmitter.
pub struct UartPacketSink<'d> {
    uart: UartTx<'d, Blocking>,
}

impl<'d> UartPacketSink<'d> {
    #[must_use]
    pub fn new(uart: UartTx<'d, Blocking>) -> Self {
        Self { uart }
    }
}

impl PacketSink for UartPacketSink<'_> {
    async fn send(&mut self, packet: &SerialPacket) -> Result<(), SinkError> {
        self.uart
            .blocking_write(packet.as_bytes())
            .map_err(|_| SinkError::Io)?;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}
