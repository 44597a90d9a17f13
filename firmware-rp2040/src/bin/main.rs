#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_time::{Delay, Timer};
use ps2_to_serial_rp2040::{
    clock_edge_task, timer_tick_task, BusControl, MouseBridge, MouseSequencer, PicoBus,
    Ps2LinkHandle, UartPacketSink,
};
use ps2_link::Ps2Port;
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

/// Mailbox between the bus implementation and the driver tasks.
static BUS_CONTROL: BusControl = BusControl::new();

/// The shared PS/2 port; lives in a static so the driver tasks and the
/// main task can all hold `&'static` references to it.
static PORT: StaticCell<Ps2Port<PicoBus>> = StaticCell::new();

/// Pause between failed bring-up rounds.
const INIT_RETRY_MS: u64 = 500;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("PS/2-to-serial starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- PS/2 bus setup ---
    let clock = Flex::new(p.PIN_2);
    let data = Flex::new(p.PIN_3);
    let port = PORT.init(Ps2Port::new(PicoBus::new(clock, data, &BUS_CONTROL)));

    spawner.spawn(clock_edge_task(port, &BUS_CONTROL)).unwrap();
    spawner.spawn(timer_tick_task(port, &BUS_CONTROL)).unwrap();

    // --- Serial mouse output, 1200 baud 8N1 ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = serial_proto::BAUD_RATE;
    let uart = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);

    // Optional: LED for error indication (on-board LED on Pico)
    let mut led = Output::new(p.PIN_25, Level::Low);

    // --- Mouse bring-up ---
    let mut sequencer = MouseSequencer::new(Ps2LinkHandle::new(port), Delay);
    let profile = loop {
        match sequencer.init(true).await {
            Ok(profile) => break profile,
            Err(e) => {
                warn!("mouse init failed: {}, retrying", e);
                led.toggle();
                Timer::after_millis(INIT_RETRY_MS).await;
            }
        }
    };
    led.set_low();
    info!(
        "mouse initialized: wheel={}, held buttons={}",
        profile.wheel, profile.buttons
    );

    // --- Forwarding loop ---
    let mut bridge = MouseBridge::new(sequencer.into_link(), UartPacketSink::new(uart));
    loop {
        if let Err(e) = bridge.process_one().await {
            error!("serial output error: {}", e);
            led.toggle();
        }
    }
}
