//! MouseBridge: connects the PS/2 byte link to a serial packet sink.

use crate::link::ByteLink;
use crate::sink::{PacketSink, SinkError};
use mouse_proto::ReportAssembler;
use serial_proto::SerialPacket;

/// A bridge that forwards mouse motion from a byte link to a packet sink.
///
/// This abstraction decouples the wire engine from the output
/// implementation, making the system more testable and flexible.
///
/// Bytes that cannot start a report are discarded by the assembler, so
/// a torn report costs at most two packets before the stream realigns.
pub struct MouseBridge<L, S> {
    link: L,
    sink: S,
    assembler: ReportAssembler,
}

impl<L: ByteLink, S: PacketSink> MouseBridge<L, S> {
    /// Create a new bridge from a byte link and a packet sink.
    pub fn new(link: L, sink: S) -> Self {
        Self {
            link,
            sink,
            assembler: ReportAssembler::new(),
        }
    }

    /// Run the bridge, forwarding packets indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Consume one received byte; forwards a packet when that byte
    /// completes a report.
    ///
    /// Returns whether a packet was forwarded, for testing purposes.
    pub async fn process_one(&mut self) -> Result<bool, SinkError> {
        let byte = self.link.recv_byte().await;
        let Some(report) = self.assembler.push(byte) else {
            return Ok(false);
        };
        // The assembler only releases reports with the always-set bit
        // present, so the remap cannot reject this one.
        let Some(packet) = SerialPacket::from_ps2(&report) else {
            return Ok(false);
        };
        self.sink.send(&packet).await?;
        Ok(true)
    }

    /// Get a reference to the byte link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Get a mutable reference to the byte link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Bytes the assembler discarded while hunting for a report boundary.
    pub fn dropped_bytes(&self) -> u32 {
        self.assembler.dropped()
    }

    /// Decompose the bridge into its link and sink components.
    pub fn into_parts(self) -> (L, S) {
        (self.link, self.sink)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::block_on;
    use core::future::Future;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    // Simple mock byte link fed from a canned byte stream
    struct MockLink {
        bytes: VecDeque<u8>,
    }

    impl MockLink {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.iter().copied().collect(),
            }
        }
    }

    impl ByteLink for MockLink {
        fn enable_receive(&mut self, _enable: bool) {}

        fn poll_byte(&mut self) -> Option<u8> {
            self.bytes.pop_front()
        }

        fn recv_byte(&mut self) -> impl Future<Output = u8> {
            core::future::ready(self.bytes.pop_front().unwrap())
        }

        fn send_byte(&mut self, _byte: u8) -> impl Future<Output = ()> {
            core::future::ready(())
        }
    }

    // Simple mock packet sink
    struct MockSink {
        sent: Arc<Mutex<Vec<SerialPacket>>>,
        fail: bool,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }
        }
    }

    impl PacketSink for MockSink {
        fn send(&mut self, packet: &SerialPacket) -> impl Future<Output = Result<(), SinkError>> {
            let result = if self.fail {
                Err(SinkError::Io)
            } else {
                self.sent.lock().unwrap().push(*packet);
                Ok(())
            };
            core::future::ready(result)
        }

        fn is_ready(&self) -> bool {
            !self.fail
        }
    }

    #[test]
    fn forwards_a_complete_report_as_one_packet() {
        // Left button held, dx = +2.
        let link = MockLink::new(&[0x09, 0x02, 0x00]);
        let sink = MockSink::new();
        let sent_ref = sink.sent.clone();

        let mut bridge = MouseBridge::new(link, sink);
        assert_eq!(block_on(bridge.process_one()), Ok(false));
        assert_eq!(block_on(bridge.process_one()), Ok(false));
        assert_eq!(block_on(bridge.process_one()), Ok(true));

        let sent = sent_ref.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], SerialPacket([0xE0, 0x81, 0x80]));
    }

    #[test]
    fn resynchronizes_after_a_torn_report() {
        // Two orphan motion bytes, then a clean report.
        let link = MockLink::new(&[0x44, 0x55, 0x08, 0x01, 0xFF]);
        let sink = MockSink::new();
        let sent_ref = sink.sent.clone();

        let mut bridge = MouseBridge::new(link, sink);
        for _ in 0..4 {
            assert_eq!(block_on(bridge.process_one()), Ok(false));
        }
        assert_eq!(block_on(bridge.process_one()), Ok(true));
        assert_eq!(bridge.dropped_bytes(), 2);

        assert_eq!(sent_ref.lock().unwrap().len(), 1);
    }

    #[test]
    fn sink_errors_surface_without_losing_alignment() {
        let link = MockLink::new(&[0x08, 0x00, 0x00, 0x08, 0x01, 0x00]);
        let mut sink = MockSink::new();
        sink.fail = true;
        let sent_ref = sink.sent.clone();

        let mut bridge = MouseBridge::new(link, sink);
        assert_eq!(block_on(bridge.process_one()), Ok(false));
        assert_eq!(block_on(bridge.process_one()), Ok(false));
        assert_eq!(block_on(bridge.process_one()), Err(SinkError::Io));

        // The next report still frames correctly.
        bridge.sink.fail = false;
        assert_eq!(block_on(bridge.process_one()), Ok(false));
        assert_eq!(block_on(bridge.process_one()), Ok(false));
        assert_eq!(block_on(bridge.process_one()), Ok(true));
        assert_eq!(sent_ref.lock().unwrap().len(), 1);
    }
}
