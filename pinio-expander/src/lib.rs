//! GPIO expander backends
//!
//! Drivers in this crate implement [`pinio_hal::GpioBackend`] for I/O
//! expanders hanging off an `embedded-hal` bus, so `IOE_*` pins can be used
//! exactly like native ones once combined with a native backend through
//! [`pinio_hal::Routed`]:
//!
//! - MCP23017 (16-bit, I2C)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod mcp23017;

pub use mcp23017::Mcp23017;
