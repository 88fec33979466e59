//! Physical GPIO backend for the indicator LEDs

use super::{driver::{DriverError, PinMap}, Indicator};

#[cfg(target_os = "linux")]
use rppal::gpio::{Gpio, OutputPin};

/// The three acquired output lines
#[cfg(target_os = "linux")]
#[derive(Debug)]
pub(crate) struct Outputs {
    pending: OutputPin,
    cooking: OutputPin,
    ready: OutputPin,
}

#[cfg(target_os = "linux")]
impl Outputs {
    /// Claim the three pins as outputs driven low
    pub(crate) fn acquire(pins: &PinMap) -> Result<Self, DriverError> {
        let gpio = Gpio::new()?;
        let output = |pin: u8| -> Result<OutputPin, DriverError> {
            Ok(gpio.get(pin)?.into_output_low())
        };

        Ok(Self {
            pending: output(pins.pending)?,
            cooking: output(pins.cooking)?,
            ready: output(pins.ready)?,
        })
    }

    pub(crate) fn write(&mut self, indicator: Indicator, on: bool) {
        let pin = match indicator {
            Indicator::Pending => &mut self.pending,
            Indicator::Cooking => &mut self.cooking,
            Indicator::Ready => &mut self.ready,
        };
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }

    /// Drive every line low and hand the pins back; dropping restores their previous mode
    pub(crate) fn release(mut self) {
        for indicator in Indicator::ALL {
            self.write(indicator, false);
        }
    }
}

#[cfg(not(target_os = "linux"))]
#[derive(Debug)]
pub(crate) struct Outputs;

#[cfg(not(target_os = "linux"))]
impl Outputs {
    pub(crate) fn acquire(_pins: &PinMap) -> Result<Self, DriverError> {
        Err(DriverError::Unsupported)
    }

    pub(crate) fn write(&mut self, _indicator: Indicator, _on: bool) {}

    pub(crate) fn release(self) {}
}
