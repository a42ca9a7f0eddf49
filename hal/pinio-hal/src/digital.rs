//! `embedded-hal` digital traits over the dispatch layer
//!
//! Lets drivers written against `embedded_hal::digital` run on any
//! backend. Unconnected pins keep their dispatch semantics: writes are
//! dropped and reads report low.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::backend::GpioBackend;
use crate::gpio::Gpio;

/// A descriptor paired with the backend that owns it
pub struct Pin<'a, B: GpioBackend> {
    backend: &'a B,
    gpio: Gpio<B::Port>,
}

impl<'a, B: GpioBackend> Pin<'a, B> {
    pub fn new(backend: &'a B, gpio: Gpio<B::Port>) -> Self {
        Self { backend, gpio }
    }

    pub fn gpio(&self) -> &Gpio<B::Port> {
        &self.gpio
    }

    /// Release the descriptor
    pub fn free(self) -> Gpio<B::Port> {
        self.gpio
    }
}

impl<B: GpioBackend> ErrorType for Pin<'_, B> {
    type Error = Infallible;
}

impl<B: GpioBackend> InputPin for Pin<'_, B> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.gpio.is_high(self.backend))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.gpio.is_high(self.backend))
    }
}

impl<B: GpioBackend> OutputPin for Pin<'_, B> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.gpio.write(self.backend, 0);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.gpio.write(self.backend, 1);
        Ok(())
    }
}

impl<B: GpioBackend> StatefulOutputPin for Pin<'_, B> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.gpio.is_high(self.backend))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.gpio.is_high(self.backend))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.gpio.toggle(self.backend);
        Ok(())
    }
}
