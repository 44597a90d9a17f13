//! RP2040 GPIO implementation of the PS/2 bus seam.
//!
//! Both PS/2 lines are open collector: the pin is an input (released,
//! pulled high externally) until the engine asks for output, and is
//! only ever driven low or released, never driven high against the
//! device.
//!
//! The engine's edge events and timer ticks come from two driver
//! tasks rather than raw interrupts. [`BusControl`] is the mailbox
//! between the engine (which masks edges and arms phases from inside
//! the lock) and the tasks (which run outside it).

use embassy_rp::gpio::{Flex, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use portable_atomic::{AtomicBool, AtomicU8, Ordering};
use ps2_link::{BusIo, Dir, Ps2Port, TickPhase};

/// Poll interval for the edge task while reception is masked.
const EDGE_IDLE_POLL_US: u64 = 100;

/// Shared state between the bus implementation and the driver tasks.
///
/// `armed` holds the raw tick phase plus one, zero meaning stopped, so
/// a single atomic carries both the on/off state and the period.
pub struct BusControl {
    edge_enabled: AtomicBool,
    armed: AtomicU8,
    kick: Signal<CriticalSectionRawMutex, ()>,
}

impl BusControl {
    pub const fn new() -> Self {
        Self {
            edge_enabled: AtomicBool::new(false),
            armed: AtomicU8::new(0),
            kick: Signal::new(),
        }
    }
}

/// The PS/2 bus on two Pico GPIOs.
pub struct PicoBus {
    clock: Flex<'static>,
    data: Flex<'static>,
    ctrl: &'static BusControl,
}

impl PicoBus {
    /// Take ownership of the two bus pins, released and pulled up.
    pub fn new(
        mut clock: Flex<'static>,
        mut data: Flex<'static>,
        ctrl: &'static BusControl,
    ) -> Self {
        // The board should carry real pull-ups; the internal ones are
        // a fallback for bench setups without them.
        clock.set_pull(Pull::Up);
        data.set_pull(Pull::Up);
        clock.set_as_input();
        data.set_as_input();
        Self { clock, data, ctrl }
    }

    fn set_dir(pin: &mut Flex<'static>, dir: Dir) {
        match dir {
            Dir::Input => pin.set_as_input(),
            Dir::Output => pin.set_as_output(),
        }
    }
}

impl BusIo for PicoBus {
    fn set_clock_dir(&mut self, dir: Dir) {
        Self::set_dir(&mut self.clock, dir);
    }

    fn set_data_dir(&mut self, dir: Dir) {
        Self::set_dir(&mut self.data, dir);
    }

    fn write_clock(&mut self, high: bool) {
        if high {
            self.clock.set_high();
        } else {
            self.clock.set_low();
        }
    }

    fn write_data(&mut self, high: bool) {
        if high {
            self.data.set_high();
        } else {
            self.data.set_low();
        }
    }

    fn read_clock(&self) -> bool {
        self.clock.is_high()
    }

    fn read_data(&self) -> bool {
        self.data.is_high()
    }

    fn set_edge_irq(&mut self, enabled: bool) {
        self.ctrl.edge_enabled.store(enabled, Ordering::Release);
    }

    fn arm_timer(&mut self, phase: TickPhase) {
        self.ctrl.armed.store(phase as u8 + 1, Ordering::Release);
        self.ctrl.kick.signal(());
    }

    fn stop_timer(&mut self) {
        self.ctrl.armed.store(0, Ordering::Release);
    }
}

/// Samples the PS/2 clock and feeds falling edges to the engine.
///
/// Re-arming `last_high` while masked implements the edge seam's
/// discard rule: an edge latched during the mask never fires.
///
/// TODO: move clock sampling into a PIO state machine; a busy executor
/// can stretch the poll past half a clock period at the fast end of
/// the PS/2 range.
#[embassy_executor::task]
pub async fn clock_edge_task(port: &'static Ps2Port<PicoBus>, ctrl: &'static BusControl) {
    let mut last_high = true;
    loop {
        if !ctrl.edge_enabled.load(Ordering::Acquire) {
            last_high = true;
            Timer::after_micros(EDGE_IDLE_POLL_US).await;
            continue;
        }

        let high = port.with_bus(|bus| bus.read_clock());
        if last_high && !high {
            port.on_clock_edge();
        }
        last_high = high;

        embassy_futures::yield_now().await;
    }
}

/// Runs the engine's armed tick phase at its period.
///
/// The phase is re-read every round, so re-arming mid-sleep takes
/// effect on the next tick and a stop suppresses the tick that was
/// already sleeping.
#[embassy_executor::task]
pub async fn timer_tick_task(port: &'static Ps2Port<PicoBus>, ctrl: &'static BusControl) {
    loop {
        let raw = ctrl.armed.load(Ordering::Acquire);
        let Some(phase) = raw.checked_sub(1).and_then(TickPhase::from_raw) else {
            ctrl.kick.wait().await;
            continue;
        };

        Timer::after_micros(phase.period_us() as u64).await;
        if ctrl.armed.load(Ordering::Acquire) == raw {
            port.on_timer_tick();
        }
    }
}
