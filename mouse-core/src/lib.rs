//! Platform-agnostic mouse bring-up and serial-bridge logic.
//!
//! This crate connects the PS/2 byte layer to the legacy serial mouse
//! encoding without any platform-specific dependencies. It can be used
//! both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`link`]: Byte-level transport trait ([`ByteLink`])
//! - [`sink`]: Serial packet sink trait ([`PacketSink`])
//! - [`sequencer`]: Mouse detection and initialization ([`MouseSequencer`])
//! - [`bridge`]: Orchestrates report-to-packet flow ([`MouseBridge`])
//!
//! A firmware wires these up in two phases. First the sequencer drives
//! the link through reset and initialization and reports what kind of
//! mouse answered. Then the bridge takes over the link and forwards
//! motion reports to the packet sink indefinitely.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod link;
pub mod sequencer;
pub mod sink;
#[cfg(test)]
mod testutil;

// Re-export main types at crate root
pub use bridge::MouseBridge;
pub use link::ByteLink;
pub use sequencer::{InitError, MouseProfile, MouseSequencer, Resolution};
pub use sink::{PacketSink, SinkError};
