//! Scripted bus for host tests: records every line operation and lets
//! the test play the peer's side of the wires.

extern crate std;

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use crate::bus::{BusIo, Dir, TickPhase};

/// One recorded bus operation, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    ClockDir(Dir),
    DataDir(Dir),
    ClockLevel(bool),
    DataLevel(bool),
    EdgeIrq(bool),
    TimerArmed(TickPhase),
    TimerStopped,
}

#[derive(Debug)]
struct Shared {
    clock_in: bool,
    data_in: bool,
    armed: Option<TickPhase>,
    edge_irq: bool,
    events: Vec<BusEvent>,
}

impl Shared {
    fn new() -> Self {
        Self {
            // Pulled-up lines idle high.
            clock_in: true,
            data_in: true,
            armed: None,
            edge_irq: false,
            events: Vec::new(),
        }
    }
}

/// Cloneable handle; the engine owns one clone, the test keeps another.
#[derive(Clone)]
pub struct MockBus(Arc<Mutex<Shared>>);

impl MockBus {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Shared::new())))
    }

    /// Set the peer-driven level of the data line.
    pub fn set_data(&self, high: bool) {
        self.0.lock().unwrap().data_in = high;
    }

    /// Set the peer-driven levels of both lines.
    pub fn set_lines(&self, clock_high: bool, data_high: bool) {
        let mut shared = self.0.lock().unwrap();
        shared.clock_in = clock_high;
        shared.data_in = data_high;
    }

    pub fn armed(&self) -> Option<TickPhase> {
        self.0.lock().unwrap().armed
    }

    pub fn edge_irq_enabled(&self) -> bool {
        self.0.lock().unwrap().edge_irq
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.0.lock().unwrap().events.clone()
    }

    pub fn clear_events(&self) {
        self.0.lock().unwrap().events.clear();
    }

    /// Levels driven on the data line, in order.
    pub fn data_writes(&self) -> Vec<bool> {
        self.0
            .lock()
            .unwrap()
            .events
            .iter()
            .filter_map(|e| match e {
                BusEvent::DataLevel(level) => Some(*level),
                _ => None,
            })
            .collect()
    }
}

impl BusIo for MockBus {
    fn set_clock_dir(&mut self, dir: Dir) {
        self.0.lock().unwrap().events.push(BusEvent::ClockDir(dir));
    }

    fn set_data_dir(&mut self, dir: Dir) {
        self.0.lock().unwrap().events.push(BusEvent::DataDir(dir));
    }

    fn write_clock(&mut self, high: bool) {
        self.0
            .lock()
            .unwrap()
            .events
            .push(BusEvent::ClockLevel(high));
    }

    fn write_data(&mut self, high: bool) {
        self.0
            .lock()
            .unwrap()
            .events
            .push(BusEvent::DataLevel(high));
    }

    fn read_clock(&self) -> bool {
        self.0.lock().unwrap().clock_in
    }

    fn read_data(&self) -> bool {
        self.0.lock().unwrap().data_in
    }

    fn set_edge_irq(&mut self, enabled: bool) {
        let mut shared = self.0.lock().unwrap();
        shared.edge_irq = enabled;
        shared.events.push(BusEvent::EdgeIrq(enabled));
    }

    fn arm_timer(&mut self, phase: TickPhase) {
        let mut shared = self.0.lock().unwrap();
        shared.armed = Some(phase);
        shared.events.push(BusEvent::TimerArmed(phase));
    }

    fn stop_timer(&mut self) {
        let mut shared = self.0.lock().unwrap();
        shared.armed = None;
        shared.events.push(BusEvent::TimerStopped);
    }
}
