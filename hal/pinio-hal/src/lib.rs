//! Pinio Hardware Abstraction Layer
//!
//! This crate defines the pin identity model, the electrical configuration
//! enumerations, and the backend contract that every GPIO implementation
//! satisfies. Upper-layer firmware talks to pins only through [`Gpio`];
//! the register work happens in a backend selected at compile time.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application firmware                   │
//! └─────────────────────────────────────────┘
//!                     │  Gpio::init / write / read ...
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinio-hal (dispatch + NC guard)        │
//! └─────────────────────────────────────────┘
//!                     │  GpioBackend
//!         ┌───────────┼───────────────┐
//!         ▼           ▼               ▼
//! ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//! │ pinio-hal-  │ │ pinio-hal-  │ │ pinio-      │
//! │   stm32     │ │    sim      │ │  expander   │
//! └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! Native and expander backends can sit behind one call surface with
//! [`Routed`].
//!
//! # Example
//!
//! ```ignore
//! let led = Gpio::init(&backend, PinName::PA_5, PinSettings::output(0));
//! led.toggle(&backend);
//!
//! // Absent on this board variant: every call is a no-op
//! let buzzer = Gpio::init(&backend, PinName::NC, PinSettings::output(0));
//! buzzer.write(&backend, 1);
//! assert_eq!(buzzer.read(&backend), 0);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod digital;
pub mod gpio;
pub mod pin;
pub mod routed;
pub mod table;

#[cfg(test)]
mod mock;

// Re-export key types at crate root for convenience
pub use backend::{BoundPin, GpioBackend, PinAddress, ToggleAtomicity};
pub use config::{Edge, IrqHandler, IrqMode, IrqPriority, OutputType, PinMode, PinSettings, Pull};
pub use digital::Pin;
pub use gpio::Gpio;
pub use pin::{PinName, PinParseError, Port};
pub use routed::{Routed, RoutedPort};
pub use table::{BoardPin, PinAllocator, PinTable, TableError};
