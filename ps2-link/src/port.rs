//! Concurrency wrapper around the engine.
//!
//! The two event sources and the polling caller all reach the engine
//! through a [`Ps2Port`]. Every entry runs inside a critical section,
//! so hardware-timer reconfiguration never interleaves with a tick
//! handler; a relaxed
//! atomic mirror of the state keeps [`Ps2Port::is_busy`] a single-word
//! read so the send facade can spin without taking the lock.

use core::cell::RefCell;

use critical_section::Mutex;
use portable_atomic::{AtomicU8, Ordering};

use crate::bus::BusIo;
use crate::engine::{LinkState, Ps2Engine};

/// Shared handle to the protocol engine.
///
/// Intended to live in a `static` so interrupt handlers (or the driver
/// tasks standing in for them) and the polling caller can all reach it.
pub struct Ps2Port<B: BusIo> {
    engine: Mutex<RefCell<Ps2Engine<B>>>,
    state: AtomicU8,
}

impl<B: BusIo> Ps2Port<B> {
    pub fn new(bus: B) -> Self {
        Self {
            engine: Mutex::new(RefCell::new(Ps2Engine::new(bus))),
            state: AtomicU8::new(LinkState::Idle as u8),
        }
    }

    /// Run `f` on the engine inside a critical section, then refresh
    /// the state mirror.
    fn with<R>(&self, f: impl FnOnce(&mut Ps2Engine<B>) -> R) -> R {
        critical_section::with(|cs| {
            let mut engine = self.engine.borrow_ref_mut(cs);
            let result = f(&mut engine);
            self.state.store(engine.state() as u8, Ordering::Release);
            result
        })
    }

    /// Falling-edge entry point; call once per clock edge.
    pub fn on_clock_edge(&self) {
        self.with(|engine| engine.on_clock_edge());
    }

    /// Timer-tick entry point; call once per armed tick.
    pub fn on_timer_tick(&self) {
        self.with(|engine| engine.on_timer_tick());
    }

    /// Enable or disable reception. Safe from both the polling context
    /// and the tick handler.
    pub fn enable_receive(&self, enable: bool) {
        self.with(|engine| engine.enable_receive(enable));
    }

    /// True while a frame or transmit sequence is in flight. Single
    /// atomic read; always safe to call concurrently with the handlers.
    pub fn is_busy(&self) -> bool {
        self.state.load(Ordering::Acquire) != LinkState::Idle as u8
    }

    /// True iff a completed byte is waiting.
    pub fn available(&self) -> bool {
        critical_section::with(|cs| self.engine.borrow_ref(cs).available())
    }

    /// Dequeue the oldest completed byte.
    pub fn take(&self) -> Option<u8> {
        self.with(|engine| engine.take())
    }

    /// Start a transmit sequence if the link is idle right now.
    /// Re-validates under the lock, so an edge landing between a
    /// caller's idle check and this call cannot be corrupted.
    pub fn try_begin_send(&self, byte: u8) -> bool {
        self.with(|engine| engine.try_begin_send(byte))
    }

    /// Blocking send facade.
    ///
    /// Spins until the link is idle, stages the byte, and spins until
    /// the transmit sequence has fully played out; both event sources
    /// keep firing and advancing the engine during the spin. On return
    /// the link is idle and reception is enabled. This says nothing
    /// about whether the peer accepted the byte: a negative
    /// acknowledge or a stall routes through `Error` recovery with no
    /// indication here. Callers poll for the response they expect.
    pub fn send_byte(&self, byte: u8) {
        loop {
            while self.is_busy() {
                core::hint::spin_loop();
            }
            if self.try_begin_send(byte) {
                break;
            }
        }
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }

    /// Run `f` against the bus inside the engine's critical section.
    /// Platform glue uses this to sample lines it does not own.
    pub fn with_bus<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        critical_section::with(|cs| f(self.engine.borrow_ref_mut(cs).bus_mut()))
    }
}
