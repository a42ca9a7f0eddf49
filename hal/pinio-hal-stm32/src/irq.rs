//! Interrupt controller seam
//!
//! The GPIO backend programs EXTI itself but leaves the CPU-side interrupt
//! controller to an [`IrqController`], so the backend can be exercised on
//! the host and reused across cores.

use pinio_hal::IrqPriority;

/// CPU interrupt controller as seen by the EXTI backend
pub trait IrqController {
    /// Set the priority of the interrupt serving EXTI `line` and enable it
    ///
    /// Several lines may share one interrupt; the last priority set wins.
    fn enable_line(&self, line: u8, priority: IrqPriority);
}

impl<C: IrqController> IrqController for &C {
    fn enable_line(&self, line: u8, priority: IrqPriority) {
        (**self).enable_line(line, priority)
    }
}

/// Preemption level for a priority (0 = most urgent)
pub const fn preemption_level(priority: IrqPriority) -> u8 {
    match priority {
        IrqPriority::VeryLow | IrqPriority::Low => 3,
        IrqPriority::Medium => 2,
        IrqPriority::High => 1,
        IrqPriority::VeryHigh => 0,
    }
}

/// Priority byte for an NVIC implementing `prio_bits` bits
pub const fn nvic_priority(priority: IrqPriority, prio_bits: u8) -> u8 {
    preemption_level(priority) << (8 - prio_bits)
}

#[cfg(feature = "cortex-m")]
pub use nvic::NvicController;

#[cfg(feature = "cortex-m")]
mod nvic {
    use core::cell::RefCell;

    use cortex_m::interrupt::InterruptNumber;
    use cortex_m::peripheral::NVIC;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::blocking_mutex::Mutex;
    use pinio_hal::IrqPriority;

    use super::{nvic_priority, IrqController};
    use crate::regs::ChipLayout;

    #[derive(Debug, Clone, Copy)]
    struct ExtiIrq(u16);

    // SAFETY: numbers come from the chip layout's EXTI wiring table
    unsafe impl InterruptNumber for ExtiIrq {
        fn number(self) -> u16 {
            self.0
        }
    }

    /// [`IrqController`] over the Cortex-M NVIC
    pub struct NvicController {
        nvic: Mutex<CriticalSectionRawMutex, RefCell<NVIC>>,
        exti_irq: [u16; 16],
        prio_bits: u8,
    }

    impl NvicController {
        pub fn new(nvic: NVIC, layout: &ChipLayout) -> Self {
            Self {
                nvic: Mutex::new(RefCell::new(nvic)),
                exti_irq: layout.exti_irq,
                prio_bits: layout.nvic_prio_bits,
            }
        }
    }

    impl IrqController for NvicController {
        fn enable_line(&self, line: u8, priority: IrqPriority) {
            let irq = ExtiIrq(self.exti_irq[line as usize & 0x0F]);
            let level = nvic_priority(priority, self.prio_bits);
            self.nvic.lock(|nvic| {
                // SAFETY: the backend relies on global critical sections,
                // never on priority-based masking
                unsafe {
                    nvic.borrow_mut().set_priority(irq, level);
                    NVIC::unmask(irq);
                }
            });
        }
    }
}
