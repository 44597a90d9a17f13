//! Event-driven engine for the PS/2 device bus.
//!
//! The PS/2 bus is a two-wire, open-collector, device-clocked serial
//! bus. This crate turns it into a byte stream: bit-level receive and
//! transmit framing, odd-parity checking, host-initiated
//! request-to-send sequencing, and watchdog-based error recovery, all
//! driven from exactly two asynchronous event sources and nothing else:
//!
//! - a falling edge on the clock line ([`Ps2Engine::on_clock_edge`])
//! - a periodic timer tick ([`Ps2Engine::on_timer_tick`])
//!
//! There is no processing thread and no blocking I/O below the public
//! API. The engine owns a [`BusIo`] implementation through which it
//! reads and drives the two lines, masks the edge event, and programs
//! the tick period per protocol phase.
//!
//! # Overview
//!
//! - [`bus`]: the platform seam ([`BusIo`], [`Dir`], [`TickPhase`])
//! - [`engine`]: the protocol state machine ([`Ps2Engine`], [`LinkState`])
//! - [`port`]: the concurrency wrapper and blocking send facade
//!   ([`Ps2Port`])
//!
//! # Wire format
//!
//! Receive frames are 11 bits: start (low), 8 data bits LSB first, odd
//! parity, stop (high). Transmit adds a 12th bit: the host holds clock
//! low for at least 100 µs, pulls data low, releases clock, and the
//! peer clocks the byte out of the host, answering with a low
//! acknowledge bit after the stop bit.
//!
//! # Failure semantics
//!
//! Framing violations and peer stalls both land in [`LinkState::Error`]
//! and self-heal back to [`LinkState::Idle`] after a fixed recovery
//! delay, with reception re-enabled. No partial frame ever reaches the
//! receive ring and no error code is surfaced: callers detect failures
//! by the absence of an expected response byte.
//!
//! # No-std Support
//!
//! `#![no_std]` by default with no heap allocation. Host tests run with
//! the `critical-section` std implementation.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bus;
pub mod engine;
pub mod port;

mod frame;
mod ring;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types at crate root
pub use bus::{BusIo, Dir, TickPhase};
pub use engine::{LinkState, Ps2Engine, ACK_RELEASE_TICKS, STALL_TICKS};
pub use port::Ps2Port;
pub use ring::RX_BUFFER_LEN;
