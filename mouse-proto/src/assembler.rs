//! Frames 3-byte reports out of the raw receive byte stream.

use crate::report::{flags, RawReport};

/// Push-byte assembler with re-synchronization.
///
/// The stream has no delimiters; the only anchor is the always-set bit
/// in byte 0 of every report. A byte that cannot start a report while
/// the assembler is empty is dropped and counted, which re-aligns the
/// stream after a glitch at the cost of at most two discarded reports.
#[derive(Debug, Default)]
pub struct ReportAssembler {
    buf: RawReport,
    len: usize,
    dropped: u32,
}

impl ReportAssembler {
    pub const fn new() -> Self {
        Self {
            buf: [0; 3],
            len: 0,
            dropped: 0,
        }
    }

    /// Feed one byte; returns a complete raw report when the third
    /// byte lands.
    pub fn push(&mut self, byte: u8) -> Option<RawReport> {
        if self.len == 0 && byte & flags::ALWAYS_ON == 0 {
            self.dropped = self.dropped.wrapping_add(1);
            return None;
        }

        self.buf[self.len] = byte;
        self.len += 1;
        if self.len == 3 {
            self.len = 0;
            Some(self.buf)
        } else {
            None
        }
    }

    /// Discard any partially assembled report.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Bytes dropped while hunting for a report boundary.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
