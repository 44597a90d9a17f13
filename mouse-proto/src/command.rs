//! Host-to-device commands and device response bytes.

/// Commands the host sends to the mouse. Each is acknowledged with
/// [`ACK`] unless noted otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Reset and self-test; answered by [`SELF_TEST_PASSED`] plus a
    /// device ID once the test completes.
    Reset = 0xFF,
    /// Retransmit the last response.
    Resend = 0xFE,
    /// Restore default sample rate, resolution, and scaling.
    SetDefaults = 0xF6,
    /// Stop stream-mode reporting.
    Disable = 0xF5,
    /// Start stream-mode reporting.
    Enable = 0xF4,
    /// Next byte is the sample rate in reports per second.
    SetSampleRate = 0xF3,
    /// Answered by the device ID byte.
    ReadId = 0xF2,
    /// Answered by a 3-byte status snapshot; byte 0 carries the
    /// current button state in its low bits.
    StatusRequest = 0xE9,
    /// Next byte selects the resolution (0..=3, counts/mm 1..8).
    SetResolution = 0xE8,
    /// 2:1 acceleration scaling.
    SetScaling2To1 = 0xE7,
    /// Linear 1:1 scaling.
    SetScaling1To1 = 0xE6,
}

impl Command {
    /// The wire byte for this command.
    pub const fn byte(self) -> u8 {
        self as u8
    }
}

/// Acknowledge. Some devices also answer a reset with this before the
/// self-test result.
pub const ACK: u8 = 0xFA;

/// Self-test passed, sent after a reset completes.
pub const SELF_TEST_PASSED: u8 = 0xAA;

/// Self-test failed.
pub const SELF_TEST_FAILED: u8 = 0xFC;

/// Device ID of a plain 3-byte-report mouse.
pub const DEVICE_ID_PLAIN: u8 = 0x00;

/// Device ID reported after the wheel-mode knock succeeds.
pub const DEVICE_ID_WHEEL: u8 = 0x03;

/// The sample-rate knock sequence that unlocks wheel mode on devices
/// that support it: set 200, then 100, then 80 reports per second,
/// then read the device ID back.
pub const WHEEL_KNOCK_RATES: [u8; 3] = [200, 100, 80];
