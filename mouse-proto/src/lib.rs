//! PS/2 mouse protocol vocabulary.
//!
//! Everything above the bit level of the PS/2 bus and below the serial
//! translation: the host-to-device command set, the device's response
//! bytes, the 3-byte relative-motion report, and a re-synchronizing
//! assembler that frames reports out of the raw byte stream.
//!
//! # Report format
//!
//! A stream-mode mouse sends 3-byte reports:
//!
//! ```text
//! byte 0: Yovf Xovf Ysign Xsign 1 M R L
//! byte 1: X movement, low 8 bits
//! byte 2: Y movement, low 8 bits
//! ```
//!
//! Movement is 9-bit two's complement; the sign bits in byte 0 extend
//! bytes 1 and 2. Bit 3 of byte 0 is always set, which is the only
//! synchronization aid the protocol offers.
//!
//! # No-std Support
//!
//! `#![no_std]` by default and heap-free.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod assembler;
pub mod command;
pub mod report;

// Re-export main types at crate root
pub use assembler::ReportAssembler;
pub use command::{
    Command, ACK, DEVICE_ID_PLAIN, DEVICE_ID_WHEEL, SELF_TEST_FAILED, SELF_TEST_PASSED,
    WHEEL_KNOCK_RATES,
};
pub use report::{Buttons, MouseReport, RawReport};
