//! The protocol state machine.
//!
//! Two entry points advance everything: [`Ps2Engine::on_clock_edge`]
//! for every falling edge the peer (or the request-to-send sequence)
//! produces on the clock line, and [`Ps2Engine::on_timer_tick`] for
//! every tick of the one shared timer. Each handler runs to completion;
//! the state value fully encodes which event source acts next.

use crate::bus::{BusIo, Dir, TickPhase};
use crate::frame::Frame;
use crate::ring::RxRing;

/// Ticks of [`TickPhase::AckWait`] allowed for the peer to release
/// both lines after the acknowledge bit.
pub const ACK_RELEASE_TICKS: u16 = 50;

/// Ticks of [`TickPhase::Watchdog`] allowed for the peer to clock a
/// requested transmission through. ~160 ms total.
pub const STALL_TICKS: u16 = 20;

/// Protocol state.
///
/// Exactly one instance exists per bus. Entry into a state that hands
/// control to the other event source re-arms or masks that source
/// first; the ordering is a correctness requirement, not a nicety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LinkState {
    /// Waiting for the peer's start bit.
    Idle = 0,
    /// Shifting in data bits.
    ReceivingData,
    /// Next edge carries the parity bit.
    ReceivingParity,
    /// Next edge carries the stop bit.
    ReceivingStop,
    /// Request-to-send issued; the timer, not the peer, advances this.
    TransmitRequest,
    /// Driving data bits as the peer clocks.
    TransmittingData,
    /// Next edge drives the parity bit.
    TransmittingParity,
    /// Next edge releases the line for the stop bit.
    TransmittingStop,
    /// Next edge samples the peer's acknowledge.
    TransmittingAck,
    /// Waiting for the peer to release both lines.
    TransmittingEnd,
    /// Framing violation or stall; recovery is timer-driven.
    Error,
}

/// Single countdown shared by every timed state region; the active
/// reason is implied by [`LinkState`].
#[derive(Debug, Clone, Copy)]
struct Watchdog {
    ticks: u16,
}

impl Watchdog {
    const fn new() -> Self {
        Self { ticks: 0 }
    }

    fn arm(&mut self, ticks: u16) {
        self.ticks = ticks;
    }

    /// Burn one tick; true once the budget is exhausted.
    fn bark(&mut self) -> bool {
        if self.ticks == 0 {
            true
        } else {
            self.ticks -= 1;
            false
        }
    }
}

/// The protocol state machine. Owns the bus, the frame accumulator,
/// the receive ring, and the watchdog; both handler entry points take
/// `&mut self`, so a wrapper (see [`crate::port::Ps2Port`]) serializes
/// the two event sources.
pub struct Ps2Engine<B: BusIo> {
    bus: B,
    state: LinkState,
    frame: Frame,
    rx: RxRing,
    watchdog: Watchdog,
    tx_byte: u8,
}

impl<B: BusIo> Ps2Engine<B> {
    /// Wrap a bus. The engine starts with reception disabled; call
    /// [`enable_receive`](Self::enable_receive) to start listening.
    pub fn new(bus: B) -> Self {
        let mut engine = Self {
            bus,
            state: LinkState::Idle,
            frame: Frame::new(),
            rx: RxRing::new(),
            watchdog: Watchdog::new(),
            tx_byte: 0,
        };
        engine.enable_receive(false);
        engine
    }

    /// True iff a frame or a transmit sequence is in flight.
    pub fn is_busy(&self) -> bool {
        self.state != LinkState::Idle
    }

    /// Current protocol state.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// True iff a completed byte is waiting in the receive ring.
    pub fn available(&self) -> bool {
        self.rx.available()
    }

    /// Dequeue the oldest completed byte.
    pub fn take(&mut self) -> Option<u8> {
        self.rx.take()
    }

    /// Enable or disable reception.
    ///
    /// Enabling resets to `Idle`, releases both lines, and unmasks the
    /// clock edge (discarding anything latched while masked).
    /// Disabling masks the edge, then inhibits the peer by holding the
    /// clock line low, data released.
    pub fn enable_receive(&mut self, enable: bool) {
        if enable {
            self.state = LinkState::Idle;
            self.bus.set_data_dir(Dir::Input);
            self.bus.set_clock_dir(Dir::Input);
            self.bus.set_edge_irq(true);
        } else {
            self.bus.set_edge_irq(false);
            self.bus.write_clock(false);
            self.bus.set_clock_dir(Dir::Output);
            self.bus.set_data_dir(Dir::Input);
        }
    }

    /// Stage `byte` and start the request-to-send sequence: inhibit
    /// the peer (clock held low) and arm the minimum-hold timer that
    /// will complete the request. Returns false, with no side effects,
    /// unless the link is idle.
    pub fn try_begin_send(&mut self, byte: u8) -> bool {
        if self.state != LinkState::Idle {
            return false;
        }
        self.enable_receive(false);
        self.tx_byte = byte;
        self.state = LinkState::TransmitRequest;
        self.bus.arm_timer(TickPhase::RequestToSend);
        true
    }

    /// Handle one falling edge on the clock line.
    pub fn on_clock_edge(&mut self) {
        let data_high = self.bus.read_data();

        match self.state {
            LinkState::Error => {}

            // Receive path

            LinkState::Idle => {
                if data_high {
                    // Spurious edge with no start condition.
                    self.state = LinkState::Error;
                } else {
                    self.frame.reset();
                    self.state = LinkState::ReceivingData;
                }
            }
            LinkState::ReceivingData => {
                if self.frame.shift_in(data_high) {
                    self.state = LinkState::ReceivingParity;
                }
            }
            LinkState::ReceivingParity => {
                self.state = if self.frame.parity_valid(data_high) {
                    LinkState::ReceivingStop
                } else {
                    LinkState::Error
                };
            }
            LinkState::ReceivingStop => {
                if data_high {
                    self.rx.push(self.frame.value());
                    self.state = LinkState::Idle;
                } else {
                    self.state = LinkState::Error;
                }
            }

            // Transmit path

            LinkState::TransmitRequest => {
                // The timer handler finishes the request-to-send hold.
            }
            LinkState::TransmittingData => {
                let bit = self.tx_byte & 0x01 != 0;
                self.bus.write_data(bit);
                self.tx_byte >>= 1;
                if self.frame.fold_out(bit) {
                    self.state = LinkState::TransmittingParity;
                }
            }
            LinkState::TransmittingParity => {
                self.bus.write_data(self.frame.parity_out());
                self.state = LinkState::TransmittingStop;
            }
            LinkState::TransmittingStop => {
                // Releasing the line lets the pull-up supply the stop
                // bit; drop the driven level first.
                self.bus.write_data(false);
                self.bus.set_data_dir(Dir::Input);
                self.bus.set_clock_dir(Dir::Input);
                self.state = LinkState::TransmittingAck;
            }
            LinkState::TransmittingAck => {
                if data_high {
                    // Negative acknowledge.
                    self.state = LinkState::Error;
                } else {
                    self.watchdog.arm(ACK_RELEASE_TICKS);
                    self.bus.arm_timer(TickPhase::AckWait);
                    self.state = LinkState::TransmittingEnd;
                }
            }
            LinkState::TransmittingEnd => {
                // End of transmission is timer-driven.
            }
        }

        // An Error reached anywhere above gets its recovery scheduled
        // before this handler returns.
        self.recover();
    }

    /// Handle one tick of the shared timer.
    pub fn on_timer_tick(&mut self) {
        match self.state {
            LinkState::Error => {
                // Recovery delay elapsed: park the lines, listen again.
                self.state = LinkState::Idle;
                self.bus.write_clock(false);
                self.bus.write_data(false);
                self.enable_receive(true);
                self.bus.stop_timer();
            }
            LinkState::TransmitRequest => {
                // Minimum clock hold elapsed. From here the peer does
                // the clocking, bounded by the stall watchdog.
                self.watchdog.arm(STALL_TICKS);
                self.bus.arm_timer(TickPhase::Watchdog);

                // Pull data low while clock is still held, then hand
                // the clock back to the peer and listen for its edges.
                self.bus.write_data(false);
                self.bus.set_data_dir(Dir::Output);
                self.bus.set_clock_dir(Dir::Input);
                self.bus.set_edge_irq(true);

                self.frame.reset();
                self.state = LinkState::TransmittingData;
            }
            LinkState::TransmittingEnd => {
                if self.bus.read_clock() && self.bus.read_data() {
                    // Peer released the bus; that concludes the frame.
                    self.bus.stop_timer();
                    self.state = LinkState::Idle;
                } else if self.watchdog.bark() {
                    self.state = LinkState::Error;
                    self.recover();
                }
            }
            _ => {
                // Tick with the watchdog armed mid-frame: the peer has
                // gone quiet. Probably not a mouse on the other end.
                if self.watchdog.bark() {
                    self.state = LinkState::Error;
                    self.recover();
                }
            }
        }
    }

    /// Schedule error recovery: mask the edge source, inhibit the
    /// peer, and let the timer restore `Idle` after the fixed delay.
    fn recover(&mut self) {
        if self.state == LinkState::Error {
            self.enable_receive(false);
            self.bus.arm_timer(TickPhase::Recovery);
        }
    }

    /// The platform side of the bus, for glue that needs to sample
    /// lines it does not own.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the platform side of the bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}
