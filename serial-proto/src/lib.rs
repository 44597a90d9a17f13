//! Legacy Microsoft serial mouse packet encoding.
//!
//! Translates a raw 3-byte PS/2 relative-motion report into the
//! 3-byte packet of the classic 1200-baud serial mouse. The remap is a
//! fixed bit shuffle:
//!
//! ```text
//! byte 0: 1 1 L R Y7 Y6 X7 X6
//! byte 1: 1 0 X5 X4 X3 X2 X1 X0
//! byte 2: 1 0 Y5 Y4 Y3 Y2 Y1 Y0
//! ```
//!
//! The protocol is nominally 7 data bits with 2 stop bits; keeping the
//! top bit of every byte set lets an 8N1 UART impersonate it.
//!
//! PS/2 motion is 9-bit two's complement, the serial format is 8-bit:
//! the least significant PS/2 bit is dropped (halving the resolution)
//! so the sign survives. The middle button and the overflow flags have
//! no place in the 3-byte serial format and are ignored.
//!
//! # No-std Support
//!
//! `#![no_std]` by default and heap-free.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod packet;

pub use packet::SerialPacket;

/// Line rate of the legacy serial mouse.
pub const BAUD_RATE: u32 = 1200;
