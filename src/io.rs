/*
 * The I/O module for the crossing.
 *
 * This is the only part of the firmware that knows which pins go where on the
 * DESPI-M02. It hands the lamps to the light driver, exposes the two sensor
 * inputs and runs the task that writes diagnostics to the serial port.
 */

use embassy_stm32::{
    bind_interrupts,
    gpio::{Input, Level, Output, Pin, Pull, Speed},
    mode::Async,
    peripherals, usart,
    usart::{Config, Uart},
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Receiver};

use despi_m02_crossing::diagnostics::{CHANNEL_CAPACITY, Event};
use despi_m02_crossing::lights::LightDriver;

bind_interrupts!(struct Irqs {
    USART1 => usart::InterruptHandler<peripherals::USART1>;
});

pub struct Board {
    pub lights: LightDriver<Output<'static>>,
    pub sensor_a: Input<'static>,
    pub sensor_b: Input<'static>,
    pub usart: Uart<'static, Async>,
}

pub fn init() -> Board {
    let peripherals = embassy_stm32::init(Default::default());

    // Lamp order: A red, amber, green, then B red, amber, green. Start dark,
    // the controller applies its first phase right away.
    let lights = LightDriver::new([
        Output::new(peripherals.PE1.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PB9.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PB7.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PB6.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PB8.degrade(), Level::Low, Speed::Low),
        Output::new(peripherals.PE0.degrade(), Level::Low, Speed::Low),
    ]);

    // IR modules with an open-collector output need the pull-up. An
    // active-high module should use `Pull::None` instead.
    let sensor_a = Input::new(peripherals.PE11, Pull::Up);
    let sensor_b = Input::new(peripherals.PE10, Pull::Up);

    let usart = Uart::new(
        peripherals.USART1,
        peripherals.PA10,
        peripherals.PA9,
        Irqs,
        peripherals.DMA1_CH4,
        peripherals.DMA1_CH5,
        Config::default(), // 115200 baud
    )
    .unwrap();

    Board {
        lights,
        sensor_a,
        sensor_b,
        usart,
    }
}

// Runs at its own pace. If the serial port cannot keep up, the channel fills
// and the controller drops events rather than waiting for us.
#[embassy_executor::task]
pub async fn diagnostics_task(
    events: Receiver<'static, ThreadModeRawMutex, Event, CHANNEL_CAPACITY>,
    mut usart: Uart<'static, Async>,
) -> ! {
    loop {
        let line = events.receive().await.render();
        // a lost line is no reason to stop
        let _ = usart.write(line.as_bytes()).await;
    }
}
