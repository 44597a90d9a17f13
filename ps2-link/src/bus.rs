//! Platform seam: line control, edge event masking, tick programming.
//!
//! The engine never touches hardware directly; everything it needs
//! from the platform is behind [`BusIo`]. Implementations exist for
//! RP2040 GPIO (firmware crate) and for a scripted mock (host tests).

/// Direction of one bus line.
///
/// Both lines are open-collector: `Input` releases the line and the
/// pull-up takes it high, `Output` lets the host drive the level last
/// written with [`BusIo::write_clock`]/[`BusIo::write_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dir {
    Input,
    Output,
}

/// The reason the periodic tick is currently armed.
///
/// Three unrelated timed behaviors share the one timer channel; they
/// are never concurrent because they belong to disjoint state regions.
/// The phase selects the tick period, the engine supplies the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TickPhase {
    /// One tick after the fixed delay that resets `Error` back to `Idle`.
    Recovery = 0,
    /// One tick after the minimum request-to-send clock hold.
    RequestToSend = 1,
    /// Fast ticks while waiting for the peer to release the bus after
    /// the acknowledge bit.
    AckWait = 2,
    /// Slow ticks bounding a peer that stops responding mid-transmit.
    Watchdog = 3,
}

impl TickPhase {
    /// Tick period for this phase, in microseconds.
    pub const fn period_us(self) -> u32 {
        match self {
            TickPhase::Recovery => 1_000,
            TickPhase::RequestToSend => 128,
            TickPhase::AckWait => 2,
            TickPhase::Watchdog => 8_000,
        }
    }

    /// Decode a raw discriminant, for platform glue that parks the
    /// phase in an atomic.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(TickPhase::Recovery),
            1 => Some(TickPhase::RequestToSend),
            2 => Some(TickPhase::AckWait),
            3 => Some(TickPhase::Watchdog),
            _ => None,
        }
    }
}

/// Bus line interface the engine drives.
///
/// All methods are called from within the engine's event handlers, so
/// implementations must be cheap and must not block. `arm_timer`
/// replaces any previously armed phase; ticks repeat at the phase
/// period until `stop_timer` or the next `arm_timer`.
pub trait BusIo {
    /// Configure the clock line direction.
    fn set_clock_dir(&mut self, dir: Dir);
    /// Configure the data line direction.
    fn set_data_dir(&mut self, dir: Dir);
    /// Set the level driven on the clock line while it is an output.
    fn write_clock(&mut self, high: bool);
    /// Set the level driven on the data line while it is an output.
    fn write_data(&mut self, high: bool);
    /// Sample the clock line.
    fn read_clock(&self) -> bool;
    /// Sample the data line.
    fn read_data(&self) -> bool;
    /// Mask or unmask the falling-edge event on the clock line.
    /// Unmasking must discard any edge latched while masked.
    fn set_edge_irq(&mut self, enabled: bool);
    /// Start periodic ticks at the period of `phase`.
    fn arm_timer(&mut self, phase: TickPhase);
    /// Stop the tick source.
    fn stop_timer(&mut self);
}
