//! Native + expander routing
//!
//! [`Routed`] presents two backends as one: expander pin names
//! (`IOE_*`) go to the expander backend, everything else to the native
//! one. Call sites cannot tell where a pin physically lives.

use crate::backend::{BoundPin, GpioBackend, PinAddress, ToggleAtomicity};
use crate::config::{IrqHandler, IrqMode, IrqPriority, PinSettings};
use crate::pin::PinName;

/// Port handle of a routed pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutedPort<N, E> {
    Native(N),
    Expander(E),
}

/// Backend that splits pins between a native and an expander backend
pub struct Routed<N, E> {
    native: N,
    expander: E,
}

impl<N: GpioBackend, E: GpioBackend> Routed<N, E> {
    pub fn new(native: N, expander: E) -> Self {
        Self { native, expander }
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn expander(&self) -> &E {
        &self.expander
    }
}

/// Re-address a routed pin for one of the inner backends
fn inner<'a, P: Copy>(pin: BoundPin<'_, impl Copy>, address: &'a PinAddress<P>) -> BoundPin<'a, P> {
    BoundPin {
        name: pin.name,
        pull: pin.pull,
        address,
    }
}

macro_rules! route {
    ($self:ident, $pin:ident, |$backend:ident, $inner:ident| $body:expr) => {{
        let address = $pin.address;
        match address.port {
            RoutedPort::Native(port) => {
                let addr = PinAddress {
                    pin_index: address.pin_index,
                    port,
                    port_index: address.port_index,
                };
                let $backend = &$self.native;
                let $inner = inner($pin, &addr);
                $body
            }
            RoutedPort::Expander(port) => {
                let addr = PinAddress {
                    pin_index: address.pin_index,
                    port,
                    port_index: address.port_index,
                };
                let $backend = &$self.expander;
                let $inner = inner($pin, &addr);
                $body
            }
        }
    }};
}

impl<N: GpioBackend, E: GpioBackend> GpioBackend for Routed<N, E> {
    type Port = RoutedPort<N::Port, E::Port>;

    const TOGGLE: ToggleAtomicity = N::TOGGLE.weakest(E::TOGGLE);

    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<Self::Port> {
        if name.is_expander() {
            let address = self.expander.init(name, settings);
            PinAddress {
                pin_index: address.pin_index,
                port: RoutedPort::Expander(address.port),
                port_index: address.port_index,
            }
        } else {
            let address = self.native.init(name, settings);
            PinAddress {
                pin_index: address.pin_index,
                port: RoutedPort::Native(address.port),
                port_index: address.port_index,
            }
        }
    }

    fn set_interrupt(
        &self,
        pin: BoundPin<'_, Self::Port>,
        mode: IrqMode,
        priority: IrqPriority,
        handler: IrqHandler,
    ) {
        route!(self, pin, |backend, inner| backend.set_interrupt(inner, mode, priority, handler))
    }

    fn remove_interrupt(&self, pin: BoundPin<'_, Self::Port>) {
        route!(self, pin, |backend, inner| backend.remove_interrupt(inner))
    }

    fn write(&self, pin: BoundPin<'_, Self::Port>, value: u32) {
        route!(self, pin, |backend, inner| backend.write(inner, value))
    }

    fn toggle(&self, pin: BoundPin<'_, Self::Port>) {
        route!(self, pin, |backend, inner| backend.toggle(inner))
    }

    fn read(&self, pin: BoundPin<'_, Self::Port>) -> u32 {
        route!(self, pin, |backend, inner| backend.read(inner))
    }
}
