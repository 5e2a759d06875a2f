#![no_std]
#![no_main]

// https://dev.to/theembeddedrustacean/embedded-rust-embassy-gpio-button-controlled-blinking-3ee6
// https://www.youtube.com/watch?v=dab_vzVDr_M

use embassy_executor::Spawner;
use embassy_stm32::gpio::Output;
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::{Instant, Timer};
use panic_halt as _;

use despi_m02_crossing::Controller;
use despi_m02_crossing::config::{TICK_INTERVAL, Timings};
use despi_m02_crossing::diagnostics::{CHANNEL_CAPACITY, Event};
use despi_m02_crossing::lights::LightDriver;

mod io;

static DIAGNOSTICS: Channel<ThreadModeRawMutex, Event, CHANNEL_CAPACITY> = Channel::new();

/*
 * We cannot keep running signals in a state we do not know. Try to put both
 * legs on red and stop. The panic handler halts the core.
 */
fn fail_safe(lights: &mut LightDriver<Output<'static>>) -> ! {
    let _ = lights.all_red();
    panic!("light output failure");
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let io::Board {
        mut lights,
        sensor_a,
        sensor_b,
        usart,
    } = io::init();

    spawner.must_spawn(io::diagnostics_task(DIAGNOSTICS.receiver(), usart));
    let mut diagnostics = DIAGNOSTICS.sender();

    let Ok(mut controller) = Controller::start(
        Timings::DEFAULT,
        Instant::now(),
        sensor_a.is_high(),
        sensor_b.is_high(),
        &mut lights,
        &mut diagnostics,
    ) else {
        fail_safe(&mut lights);
    };

    loop {
        let now = Instant::now();
        let ticked = controller.tick(
            now,
            sensor_a.is_high(),
            sensor_b.is_high(),
            &mut lights,
            &mut diagnostics,
        );
        if ticked.is_err() {
            fail_safe(&mut lights);
        }

        Timer::after(TICK_INTERVAL).await;
    }
}
