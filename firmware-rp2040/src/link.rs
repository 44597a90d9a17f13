//! [`ByteLink`] over the shared PS/2 port.

use crate::bus::PicoBus;
use embassy_futures::yield_now;
use mouse_core::ByteLink;
use ps2_link::Ps2Port;

/// Cooperative byte link over the interrupt-driven port.
///
/// The blocking facade on [`Ps2Port`] spins the calling context, which
/// on a single-threaded executor would starve the very driver tasks
/// that finish the transmit. This wrapper yields instead of spinning.
pub struct Ps2LinkHandle {
    port: &'static Ps2Port<PicoBus>,
}

impl Ps2LinkHandle {
    pub fn new(port: &'static Ps2Port<PicoBus>) -> Self {
        Self { port }
    }
}

impl ByteLink for Ps2LinkHandle {
    fn enable_receive(&mut self, enable: bool) {
        self.port.enable_receive(enable);
    }

    fn poll_byte(&mut self) -> Option<u8> {
        self.port.take()
    }

    async fn recv_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = self.port.take() {
                return byte;
            }
            yield_now().await;
        }
    }

    async fn send_byte(&mut self, byte: u8) {
        loop {
            while self.port.is_busy() {
                yield_now().await;
            }
            if self.port.try_begin_send(byte) {
                break;
            }
        }
        // Completion here covers the watchdog path too: an abandoned
        // transmit parks the engine back in an idle-equivalent state.
        while self.port.is_busy() {
            yield_now().await;
        }
    }
}
