//! Pin descriptor and dispatch layer
//!
//! [`Gpio`] is the only state threaded through pin operations. Each
//! operation checks whether the descriptor names a connected pin and, if
//! so, forwards to the backend; on [`PinName::NC`] it does nothing (reads
//! return 0). Board tables can therefore list pins that are absent on some
//! variants without guarding every call site.

use crate::backend::{BoundPin, GpioBackend, PinAddress};
use crate::config::{IrqHandler, IrqMode, IrqPriority, PinSettings, Pull};
use crate::pin::PinName;

/// GPIO pin descriptor
///
/// The addressing fields are private and filled in by the backend during
/// [`Gpio::init`]; a connected descriptor cannot exist without having been
/// initialized. `P` is the backend's port handle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gpio<P> {
    name: PinName,
    pull: Pull,
    address: Option<PinAddress<P>>,
}

impl<P: Copy> Gpio<P> {
    /// Inert descriptor for an absent pin
    pub const fn not_connected() -> Self {
        Self {
            name: PinName::NC,
            pull: Pull::None,
            address: None,
        }
    }

    /// Initialize a pin and obtain its descriptor
    ///
    /// For [`PinName::NC`] the backend is not called and the inert
    /// descriptor is returned.
    pub fn init<B>(backend: &B, name: PinName, settings: PinSettings) -> Self
    where
        B: GpioBackend<Port = P>,
    {
        let mut gpio = Self {
            name,
            pull: Pull::None,
            address: None,
        };
        gpio.reinit(backend, settings);
        gpio
    }

    /// Re-apply an electrical configuration to an existing descriptor
    ///
    /// Drops any interrupt binding left by the previous configuration.
    pub fn reinit<B>(&mut self, backend: &B, settings: PinSettings)
    where
        B: GpioBackend<Port = P>,
    {
        if !self.name.is_connected() {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("gpio: init {} as {}", self.name, settings);

        self.address = Some(backend.init(self.name, &settings));
        self.pull = settings.pull;
    }

    /// Bind `handler` to edges on this pin, replacing any existing binding
    pub fn set_interrupt<B>(&self, backend: &B, mode: IrqMode, priority: IrqPriority, handler: IrqHandler)
    where
        B: GpioBackend<Port = P>,
    {
        if let Some(pin) = self.bound() {
            #[cfg(feature = "defmt")]
            defmt::debug!("gpio: irq {} {} {}", self.name, mode, priority);

            backend.set_interrupt(pin, mode, priority, handler);
        }
    }

    /// Disable and detach this pin's interrupt binding
    pub fn remove_interrupt<B>(&self, backend: &B)
    where
        B: GpioBackend<Port = P>,
    {
        if let Some(pin) = self.bound() {
            backend.remove_interrupt(pin);
        }
    }

    /// Drive the output (nonzero = high)
    #[inline]
    pub fn write<B>(&self, backend: &B, value: u32)
    where
        B: GpioBackend<Port = P>,
    {
        if let Some(pin) = self.bound() {
            backend.write(pin, value);
        }
    }

    /// Invert the output
    ///
    /// Whether this is safe against an interrupt handler writing the same
    /// pin depends on the backend's [`GpioBackend::TOGGLE`].
    #[inline]
    pub fn toggle<B>(&self, backend: &B)
    where
        B: GpioBackend<Port = P>,
    {
        if let Some(pin) = self.bound() {
            backend.toggle(pin);
        }
    }

    /// Sample the line
    ///
    /// Returns 0 or 1. An unconnected pin reads 0, which is
    /// indistinguishable from a low level.
    #[inline]
    pub fn read<B>(&self, backend: &B) -> u32
    where
        B: GpioBackend<Port = P>,
    {
        match self.bound() {
            Some(pin) => backend.read(pin),
            None => 0,
        }
    }

    /// Check if the line reads high
    pub fn is_high<B>(&self, backend: &B) -> bool
    where
        B: GpioBackend<Port = P>,
    {
        self.read(backend) != 0
    }

    pub fn name(&self) -> PinName {
        self.name
    }

    /// Pull configured by the last initialization
    pub fn pull(&self) -> Pull {
        self.pull
    }

    pub fn is_connected(&self) -> bool {
        self.bound().is_some()
    }

    /// Backend-assigned addressing (`None` for NC)
    pub fn address(&self) -> Option<&PinAddress<P>> {
        self.address.as_ref()
    }

    fn bound(&self) -> Option<BoundPin<'_, P>> {
        if !self.name.is_connected() {
            return None;
        }
        self.address.as_ref().map(|address| BoundPin {
            name: self.name,
            pull: self.pull,
            address,
        })
    }
}

impl<P: Copy> Default for Gpio<P> {
    fn default() -> Self {
        Self::not_connected()
    }
}
