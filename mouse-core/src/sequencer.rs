//! Mouse detection and initialization.
//!
//! Drives a [`ByteLink`] through the bring-up conversation: reset with
//! self-test, sane defaults, a button-count probe, the wheel-mode
//! sample-rate knock, and finally stream-mode enable. Every exchange is
//! paced with real delays because the device answers on its own clock.

use crate::link::ByteLink;
use embedded_hal_async::delay::DelayNs;
use mouse_proto::{Buttons, Command, ACK, DEVICE_ID_WHEEL, SELF_TEST_PASSED, WHEEL_KNOCK_RATES};

/// How long to wait for a command response before polling for it.
pub const RESPONSE_DELAY_MS: u32 = 22;

/// Settle time between drain rounds when flushing a quiet line.
const FLUSH_FAST_MS: u32 = 1;
/// Settle time when the device may still be finishing a response.
const FLUSH_MED_MS: u32 = 22;
/// Settle time after enabling stream mode.
const FLUSH_SLOW_MS: u32 = 100;

/// Poll interval while waiting for the reset self-test to complete.
const SELF_TEST_POLL_MS: u32 = 250;
/// Self-test polls before the reset is declared dead.
const SELF_TEST_POLLS: usize = 20;

/// Full reset rounds before initialization gives up.
const RESET_ATTEMPTS: usize = 3;

/// Error type for mouse initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// No self-test result arrived after a reset.
    ResetTimeout,
    /// The device reported a failed self-test.
    SelfTestFailed,
}

/// Report resolution, in counts per millimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Resolution {
    OnePerMm = 0,
    TwoPerMm = 1,
    FourPerMm = 2,
    EightPerMm = 3,
}

/// What the bring-up conversation learned about the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseProfile {
    /// Buttons held down during initialization.
    pub buttons: Buttons,
    /// Whether the device switched into wheel mode.
    pub wheel: bool,
}

/// Runs the bring-up conversation over a byte link.
///
/// Consumes the link for the duration of initialization; call
/// [`into_link`](Self::into_link) afterwards to hand it to the bridge.
pub struct MouseSequencer<L, D> {
    link: L,
    delay: D,
}

impl<L: ByteLink, D: DelayNs> MouseSequencer<L, D> {
    /// Create a sequencer over a byte link and a delay source.
    pub fn new(link: L, delay: D) -> Self {
        Self { link, delay }
    }

    /// Decompose the sequencer, returning the link.
    pub fn into_link(self) -> L {
        self.link
    }

    /// Reset the device and wait for its self-test to pass, then fully
    /// initialize it. Retries the reset a few times before reporting
    /// the last error.
    pub async fn init(&mut self, want_wheel: bool) -> Result<MouseProfile, InitError> {
        self.link.enable_receive(true);

        let mut attempts = 0;
        loop {
            match self.reset().await {
                Ok(()) => break,
                Err(err) => {
                    attempts += 1;
                    if attempts == RESET_ATTEMPTS {
                        return Err(err);
                    }
                }
            }
        }

        self.command(Command::Disable).await;
        self.command(Command::SetDefaults).await;
        self.command(Command::SetScaling1To1).await;
        self.command(Command::SetResolution).await;
        self.raw_command(Resolution::FourPerMm as u8).await;

        let buttons = self.probe_buttons().await;
        self.flush(FLUSH_MED_MS).await;

        let wheel = if want_wheel { self.knock_wheel().await } else { false };

        self.command(Command::Enable).await;
        self.flush(FLUSH_SLOW_MS).await;

        Ok(MouseProfile { buttons, wheel })
    }

    /// Reset the device and wait for the self-test result.
    pub async fn reset(&mut self) -> Result<(), InitError> {
        self.flush(FLUSH_FAST_MS).await;
        self.command(Command::Disable).await;
        self.flush(FLUSH_FAST_MS).await;

        // A device wedged mid-frame can eat a reset; send a burst.
        for _ in 0..3 {
            self.link.send_byte(Command::Reset.byte()).await;
        }

        let mut passed = false;
        for _ in 0..SELF_TEST_POLLS {
            self.delay.delay_ms(SELF_TEST_POLL_MS).await;
            match self.link.poll_byte() {
                None => continue,
                // Some devices acknowledge the reset before (or
                // instead of) announcing the self-test result.
                Some(byte) if byte == SELF_TEST_PASSED || byte == ACK => {
                    passed = true;
                    break;
                }
                Some(_) => return Err(InitError::SelfTestFailed),
            }
        }
        if !passed {
            return Err(InitError::ResetTimeout);
        }

        // Drain the rest of the announcement, usually the device ID.
        self.delay.delay_ms(FLUSH_SLOW_MS).await;
        self.flush(FLUSH_FAST_MS).await;
        Ok(())
    }

    /// Change the report resolution on a running device.
    pub async fn set_resolution(&mut self, resolution: Resolution) {
        self.command(Command::Disable).await;
        self.command(Command::SetResolution).await;
        self.raw_command(resolution as u8).await;
        self.command(Command::Enable).await;
    }

    /// Send a command and poll for its first response byte after the
    /// standard settle delay.
    pub async fn command(&mut self, command: Command) -> Option<u8> {
        self.raw_command(command.byte()).await
    }

    async fn raw_command(&mut self, byte: u8) -> Option<u8> {
        self.link.send_byte(byte).await;
        self.delay.delay_ms(RESPONSE_DELAY_MS).await;
        self.link.poll_byte()
    }

    /// Ask for the status snapshot and extract the held buttons from
    /// its first byte.
    async fn probe_buttons(&mut self) -> Buttons {
        let mut status = self.command(Command::StatusRequest).await;
        if status == Some(ACK) {
            self.delay.delay_ms(RESPONSE_DELAY_MS).await;
            status = self.link.poll_byte();
        }
        match status {
            Some(byte) => Buttons(byte & 0x07),
            None => Buttons::NONE,
        }
    }

    /// Play the sample-rate knock and check whether the device ID
    /// changed to the wheel variant.
    async fn knock_wheel(&mut self) -> bool {
        for rate in WHEEL_KNOCK_RATES {
            self.command(Command::SetSampleRate).await;
            self.raw_command(rate).await;
        }
        self.flush(FLUSH_MED_MS).await;

        let mut id = self.command(Command::ReadId).await;
        if id == Some(ACK) {
            self.delay.delay_ms(RESPONSE_DELAY_MS).await;
            id = self.link.poll_byte();
        }
        id == Some(DEVICE_ID_WHEEL)
    }

    /// Drain the receive side until a settle interval passes with
    /// nothing arriving.
    async fn flush(&mut self, settle_ms: u32) {
        loop {
            self.delay.delay_ms(settle_ms).await;
            let mut drained = false;
            while self.link.poll_byte().is_some() {
                drained = true;
            }
            if !drained {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::block_on;
    use core::future::Future;
    use std::collections::VecDeque;
    use std::vec::Vec;

    // Mock device: answers each sent byte the way a stream-mode mouse
    // would, synchronously.
    struct MockMouse {
        rx: VecDeque<u8>,
        sent: Vec<u8>,
        // Last three sample rates seen, for the wheel knock.
        rates: Vec<u8>,
        pending_arg: Option<Command>,
        wheel_capable: bool,
        held_buttons: u8,
        self_test_result: Option<u8>,
    }

    impl MockMouse {
        fn new(wheel_capable: bool) -> Self {
            Self {
                rx: VecDeque::new(),
                sent: Vec::new(),
                rates: Vec::new(),
                pending_arg: None,
                wheel_capable,
                held_buttons: 0,
                self_test_result: Some(SELF_TEST_PASSED),
            }
        }

        fn respond(&mut self, byte: u8) {
            match self.pending_arg.take() {
                Some(Command::SetSampleRate) => {
                    self.rates.push(byte);
                    self.rx.push_back(ACK);
                    return;
                }
                Some(_) => {
                    self.rx.push_back(ACK);
                    return;
                }
                None => {}
            }
            match byte {
                0xFF => {
                    self.rx.clear();
                    if let Some(result) = self.self_test_result {
                        self.rx.push_back(result);
                        self.rx.push_back(0x00);
                    }
                }
                0xF3 => {
                    self.pending_arg = Some(Command::SetSampleRate);
                    self.rx.push_back(ACK);
                }
                0xE8 => {
                    self.pending_arg = Some(Command::SetResolution);
                    self.rx.push_back(ACK);
                }
                0xE9 => {
                    self.rx.push_back(ACK);
                    self.rx.push_back(self.held_buttons);
                    self.rx.push_back(0x02);
                    self.rx.push_back(0x64);
                }
                0xF2 => {
                    let id = if self.wheel_capable && self.rates == [200, 100, 80] {
                        DEVICE_ID_WHEEL
                    } else {
                        0x00
                    };
                    self.rx.push_back(ACK);
                    self.rx.push_back(id);
                }
                _ => self.rx.push_back(ACK),
            }
        }
    }

    impl ByteLink for MockMouse {
        fn enable_receive(&mut self, _enable: bool) {}

        fn poll_byte(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn recv_byte(&mut self) -> impl Future<Output = u8> {
            core::future::ready(self.rx.pop_front().unwrap())
        }

        fn send_byte(&mut self, byte: u8) -> impl Future<Output = ()> {
            self.sent.push(byte);
            self.respond(byte);
            core::future::ready(())
        }
    }

    struct InstantDelay;

    impl DelayNs for InstantDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn init_brings_up_a_plain_mouse() {
        let mut sequencer = MouseSequencer::new(MockMouse::new(false), InstantDelay);
        let profile = block_on(sequencer.init(true)).unwrap();
        assert!(!profile.wheel);
        assert_eq!(profile.buttons, Buttons::NONE);

        let link = sequencer.into_link();
        // The conversation ends with stream mode enabled.
        assert_eq!(link.sent.last(), Some(&0xF4));
        // The knock was played even though the device ignored it.
        assert_eq!(link.rates, [200, 100, 80]);
    }

    #[test]
    fn init_detects_a_wheel_mouse() {
        let mut sequencer = MouseSequencer::new(MockMouse::new(true), InstantDelay);
        let profile = block_on(sequencer.init(true)).unwrap();
        assert!(profile.wheel);
    }

    #[test]
    fn init_skips_the_knock_when_not_wanted() {
        let mut sequencer = MouseSequencer::new(MockMouse::new(true), InstantDelay);
        let profile = block_on(sequencer.init(false)).unwrap();
        assert!(!profile.wheel);
        assert!(sequencer.into_link().rates.is_empty());
    }

    #[test]
    fn init_reports_held_buttons() {
        let mut mouse = MockMouse::new(false);
        mouse.held_buttons = 0x01;
        let mut sequencer = MouseSequencer::new(mouse, InstantDelay);
        let profile = block_on(sequencer.init(true)).unwrap();
        assert_eq!(profile.buttons, Buttons::LEFT);
    }

    #[test]
    fn silent_device_times_out_after_bounded_retries() {
        let mut mouse = MockMouse::new(false);
        mouse.self_test_result = None;
        let mut sequencer = MouseSequencer::new(mouse, InstantDelay);
        assert_eq!(block_on(sequencer.init(true)), Err(InitError::ResetTimeout));

        // Three resets of three bursts each, no more.
        let resets = sequencer
            .into_link()
            .sent
            .iter()
            .filter(|&&b| b == 0xFF)
            .count();
        assert_eq!(resets, 9);
    }

    #[test]
    fn failed_self_test_is_reported() {
        let mut mouse = MockMouse::new(false);
        mouse.self_test_result = Some(mouse_proto::SELF_TEST_FAILED);
        let mut sequencer = MouseSequencer::new(mouse, InstantDelay);
        assert_eq!(
            block_on(sequencer.init(true)),
            Err(InitError::SelfTestFailed)
        );
    }

    #[test]
    fn set_resolution_brackets_the_change_with_disable_enable() {
        let mut sequencer = MouseSequencer::new(MockMouse::new(false), InstantDelay);
        block_on(sequencer.set_resolution(Resolution::EightPerMm));
        assert_eq!(sequencer.into_link().sent, [0xF5, 0xE8, 0x03, 0xF4]);
    }

    #[test]
    fn reset_accepts_an_ack_in_place_of_the_test_result() {
        let mut mouse = MockMouse::new(false);
        mouse.self_test_result = Some(ACK);
        let mut sequencer = MouseSequencer::new(mouse, InstantDelay);
        assert!(block_on(sequencer.reset()).is_ok());
    }
}
