//! STM32 register-level backend for pinio
//!
//! Implements [`pinio_hal::GpioBackend`] directly on the GPIO, EXTI and
//! SYSCFG register blocks found on STM32L0/L1/F0/F4 parts:
//!
//! - pin configuration through MODER/OTYPER/PUPDR
//! - atomic writes through BSRR
//! - edge interrupts through EXTI, one callback slot per line
//!
//! # Features
//!
//! - `cortex-m` - Enable [`irq::NvicController`] for real targets
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! let regs = unsafe { Registers::from_layout(&regs::STM32L1) };
//! let nvic = NvicController::new(core_peripherals.NVIC, &regs::STM32L1);
//! let gpio = Stm32Gpio::new(regs, regs::STM32L1.exticr_port, nvic);
//!
//! #[interrupt]
//! fn EXTI9_5() {
//!     GPIO.on_exti_interrupt(5..=9);
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod gpio;
pub mod irq;
pub mod regs;

pub use gpio::Stm32Gpio;
pub use irq::IrqController;
pub use regs::{ChipLayout, Registers};
