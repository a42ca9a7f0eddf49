//! Backend capability contract
//!
//! A backend owns the registers (or expander state) behind a set of pins
//! and implements the six primitives the dispatch layer forwards to.
//! Exactly one backend type is selected at compile time; [`Gpio`] is
//! generic over it, so dispatch is static.
//!
//! Backends never see [`PinName::NC`]: the dispatch layer filters it out
//! and hands them a [`BoundPin`] instead.
//!
//! [`Gpio`]: crate::Gpio

use crate::config::{IrqHandler, IrqMode, IrqPriority, PinSettings, Pull};
use crate::pin::PinName;

/// How a backend makes `toggle` indivisible
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToggleAtomicity {
    /// Plain read-modify-write. Callers sharing the pin with interrupt
    /// context must mask the interrupt around it themselves.
    Unprotected,
    /// Read-modify-write inside the backend's lock or critical section
    Locked,
    /// Single hardware operation (toggle register or equivalent)
    Hardware,
}

impl ToggleAtomicity {
    /// The weaker of two guarantees
    pub const fn weakest(self, other: Self) -> Self {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }
}

/// Backend-assigned addressing of a connected pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAddress<P> {
    /// Bit position within the owning port
    pub pin_index: u16,
    /// Handle to the owning port (register block, bank number, ...)
    pub port: P,
    /// Secondary index for backends with their own addressing scheme
    pub port_index: u16,
}

/// View of an initialized, connected descriptor handed to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundPin<'a, P> {
    pub name: PinName,
    pub pull: Pull,
    pub address: &'a PinAddress<P>,
}

/// GPIO backend
///
/// Implementations take `&self` so a single static backend can serve both
/// thread mode and interrupt handlers; any mutable state sits behind the
/// backend's own interior mutability.
///
/// Required semantics beyond simple forwarding:
/// - `init` is idempotent: the latest call fully determines the pin
///   state, and any interrupt binding from an earlier configuration of
///   the same pin is dropped.
/// - `set_interrupt` masks the interrupt source while reconfiguring it and
///   replaces any existing binding on the pin.
/// - `write`, `toggle` and `read` never allocate and are safe to call from
///   interrupt handlers.
pub trait GpioBackend {
    /// Handle to the port object a pin belongs to
    type Port: Copy;

    /// Indivisibility guarantee of [`GpioBackend::toggle`]
    const TOGGLE: ToggleAtomicity;

    /// Apply `settings` to `name` and report where the pin lives
    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<Self::Port>;

    /// Bind `handler` to edges selected by `mode`
    fn set_interrupt(
        &self,
        pin: BoundPin<'_, Self::Port>,
        mode: IrqMode,
        priority: IrqPriority,
        handler: IrqHandler,
    );

    /// Disable and detach the pin's interrupt binding
    fn remove_interrupt(&self, pin: BoundPin<'_, Self::Port>);

    /// Drive the output (nonzero = high)
    fn write(&self, pin: BoundPin<'_, Self::Port>, value: u32);

    /// Invert the output
    fn toggle(&self, pin: BoundPin<'_, Self::Port>);

    /// Sample the line, 0 or 1
    fn read(&self, pin: BoundPin<'_, Self::Port>) -> u32;
}

impl<B: GpioBackend> GpioBackend for &B {
    type Port = B::Port;

    const TOGGLE: ToggleAtomicity = B::TOGGLE;

    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<Self::Port> {
        (**self).init(name, settings)
    }

    fn set_interrupt(
        &self,
        pin: BoundPin<'_, Self::Port>,
        mode: IrqMode,
        priority: IrqPriority,
        handler: IrqHandler,
    ) {
        (**self).set_interrupt(pin, mode, priority, handler)
    }

    fn remove_interrupt(&self, pin: BoundPin<'_, Self::Port>) {
        (**self).remove_interrupt(pin)
    }

    fn write(&self, pin: BoundPin<'_, Self::Port>, value: u32) {
        (**self).write(pin, value)
    }

    fn toggle(&self, pin: BoundPin<'_, Self::Port>) {
        (**self).toggle(pin)
    }

    fn read(&self, pin: BoundPin<'_, Self::Port>) -> u32 {
        (**self).read(pin)
    }
}
