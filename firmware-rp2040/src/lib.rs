//! PS/2 mouse to legacy serial mouse converter for RP2040.
//!
//! This crate provides the embedded implementation of a protocol
//! converter that speaks PS/2 to a mouse on one side and the classic
//! 1200-baud Microsoft serial mouse protocol on the other.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Drives the PS/2 bus bit by bit (open collector, device clocked)
//! 2. Initializes the mouse and puts it into stream mode
//! 3. Re-encodes each 3-byte motion report as a serial mouse packet
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | PS/2 CLK  | 2    | Open-collector clock (external pull-up) |
//! | PS/2 DAT  | 3    | Open-collector data (external pull-up) |
//! | UART0 TX  | 0    | Serial mouse output, 1200 baud 8N1 |
//! | LED       | 25   | On-board LED (error indicator) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with three concurrent tasks:
//!
//! - **Edge Task**: Samples the PS/2 clock and feeds falling edges to the engine
//! - **Tick Task**: Runs the engine's armed timer phase at its period
//! - **Main Task**: Bring-up sequencer, then the report-to-packet bridge
//!
//! The wire engine itself lives in [`ps2_link`] behind a
//! critical-section lock; the two driver tasks and the main task only
//! ever touch it through [`Ps2Port`](ps2_link::Ps2Port).
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports the main items from [`mouse_core`] for convenience,
//! so consumers only need to depend on this crate.

#![no_std]

// Re-export core types for convenience
pub use mouse_core::{
    ByteLink, InitError, MouseBridge, MouseProfile, MouseSequencer, PacketSink, Resolution,
    SinkError,
};

pub mod bus;
pub mod link;
pub mod serial;

pub use bus::{clock_edge_task, timer_tick_task, BusControl, PicoBus};
pub use link::Ps2LinkHandle;
pub use serial::UartPacketSink;
