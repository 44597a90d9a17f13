//! The 3-byte serial packet and the PS/2 remap.

use mouse_proto::report::flags;
use mouse_proto::RawReport;

/// One serial mouse packet, ready for the UART.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialPacket(pub [u8; 3]);

impl SerialPacket {
    /// Remap a raw PS/2 report. Returns `None` if the report's
    /// always-set bit is clear, the only validation the input allows.
    pub fn from_ps2(src: &RawReport) -> Option<Self> {
        if src[0] & flags::ALWAYS_ON == 0 {
            return None;
        }

        // Byte 0 starts as sync + simulated stop bit; bytes 1 and 2
        // keep their top bit set for the same reason.
        let mut b0 = 0xC0u8;

        // Buttons; the middle one has nowhere to go.
        b0 |= (src[0] & flags::LEFT) << 5;
        b0 |= (src[0] & flags::RIGHT) << 3;

        // Sign bits become motion bits 7, the PS/2 low bytes supply
        // bit 6 from their top bit; bit 0 of the 9-bit value is lost.
        b0 |= (src[0] & flags::Y_SIGN) >> 2; // Y7
        b0 |= (src[0] & flags::X_SIGN) >> 3; // X7
        b0 |= (src[2] & 0x80) >> 5; // Y6
        b0 |= (src[1] & 0x80) >> 7; // X6

        let b1 = 0x80 | ((src[1] & 0x7E) >> 1); // X5..X0
        let b2 = 0x80 | ((src[2] & 0x7E) >> 1); // Y5..Y0

        Some(Self([b0, b1, b2]))
    }

    /// The packet bytes in transmit order.
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}
