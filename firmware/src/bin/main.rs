#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use tiltpad::{
    configure_usb_hid, halt, AdcInput, ConnectionHandler, GamepadController, HostConnection,
    PinConfig, UsbHidPublisher, PAD_CONFIG,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[cfg(feature = "motion")]
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
    I2C0_IRQ => embassy_rp::i2c::InterruptHandler<embassy_rp::peripherals::I2C0>;
});

#[cfg(not(feature = "motion"))]
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
});

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

/// Host connection flag, written by the USB stack, read by the publisher.
static CONNECTION: HostConnection = HostConnection::new();
static USB_HANDLER: StaticCell<ConnectionHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("tiltpad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Inputs ---
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let pins = PinConfig {
        button_pins: [
            Input::new(p.PIN_10, Pull::Up),
            Input::new(p.PIN_11, Pull::Up),
            Input::new(p.PIN_12, Pull::Up),
            Input::new(p.PIN_13, Pull::Up),
        ],
        analog_pin: AdcInput::new(adc, AdcChannel::new_pin(p.PIN_26, Pull::None)),
    };

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let device = PAD_CONFIG.device;
    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some(device.manufacturer);
    usb_config.product = Some(device.name);
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    builder.handler(USB_HANDLER.init(ConnectionHandler::new(&CONNECTION)));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    let publisher = UsbHidPublisher::new(hid_writer, &CONNECTION, PAD_CONFIG.axis_range);

    spawner.spawn(usb_task(usb_device).unwrap());

    // --- Motion sensor ---
    #[cfg(feature = "motion")]
    let motion = {
        use embassy_rp::i2c::{Config as I2cConfig, I2c};
        let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, I2cConfig::default());
        Some(tiltpad::Mpu6050::new(i2c, Delay))
    };
    #[cfg(not(feature = "motion"))]
    let motion: Option<tiltpad::NoMotion> = None;

    let mut delay = Delay;
    let mut controller = match GamepadController::init(pins, motion, publisher, PAD_CONFIG).await
    {
        Ok(controller) => controller,
        Err(e) => {
            error!("Failed to find MPU6050 chip: {:?}", e);
            halt(&mut delay).await
        }
    };

    info!("tiltpad initialized, waiting for host...");
    controller.run(&mut delay).await
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}
