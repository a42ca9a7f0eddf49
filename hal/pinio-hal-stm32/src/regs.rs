//! Register blocks
//!
//! Layouts shared by the STM32L0/L1/F0/F4 GPIO, EXTI and SYSCFG
//! peripherals. Blocks are normally obtained from their peripheral
//! address; [`GpioRegisters::reset`] and friends build RAM copies for
//! host-side testing.

use core::cell::UnsafeCell;

use pinio_hal::Port;

/// One 32-bit memory-mapped register
#[repr(transparent)]
pub struct Reg(UnsafeCell<u32>);

// Registers are plain memory cells accessed with volatile operations;
// concurrent access is arbitrated by the backend.
unsafe impl Sync for Reg {}

impl Reg {
    pub const fn new(value: u32) -> Self {
        Self(UnsafeCell::new(value))
    }

    #[inline]
    pub fn read(&self) -> u32 {
        // SAFETY: the cell is valid for reads for the lifetime of `self`
        unsafe { core::ptr::read_volatile(self.0.get()) }
    }

    #[inline]
    pub fn write(&self, value: u32) {
        // SAFETY: the cell is valid for writes for the lifetime of `self`
        unsafe { core::ptr::write_volatile(self.0.get(), value) }
    }

    /// Read-modify-write; not atomic on its own
    #[inline]
    pub fn modify(&self, f: impl FnOnce(u32) -> u32) {
        self.write(f(self.read()));
    }

    /// Replace the `width`-bit field at `shift`
    #[inline]
    pub fn set_field(&self, shift: u32, width: u32, value: u32) {
        let mask = ((1 << width) - 1) << shift;
        self.modify(|v| (v & !mask) | ((value << shift) & mask));
    }
}

/// GPIO port registers
#[repr(C)]
pub struct GpioRegisters {
    pub moder: Reg,
    pub otyper: Reg,
    pub ospeedr: Reg,
    pub pupdr: Reg,
    pub idr: Reg,
    pub odr: Reg,
    /// Bit set/reset: low half sets, high half resets (write-only)
    pub bsrr: Reg,
    pub lckr: Reg,
    pub afr: [Reg; 2],
}

impl GpioRegisters {
    /// A block with every register cleared
    pub const fn reset() -> Self {
        Self {
            moder: Reg::new(0),
            otyper: Reg::new(0),
            ospeedr: Reg::new(0),
            pupdr: Reg::new(0),
            idr: Reg::new(0),
            odr: Reg::new(0),
            bsrr: Reg::new(0),
            lckr: Reg::new(0),
            afr: [Reg::new(0), Reg::new(0)],
        }
    }
}

/// External interrupt/event controller registers
#[repr(C)]
pub struct ExtiRegisters {
    /// Interrupt mask (1 = enabled)
    pub imr: Reg,
    pub emr: Reg,
    /// Rising trigger selection
    pub rtsr: Reg,
    /// Falling trigger selection
    pub ftsr: Reg,
    pub swier: Reg,
    /// Pending (write 1 to clear)
    pub pr: Reg,
}

impl ExtiRegisters {
    pub const fn reset() -> Self {
        Self {
            imr: Reg::new(0),
            emr: Reg::new(0),
            rtsr: Reg::new(0),
            ftsr: Reg::new(0),
            swier: Reg::new(0),
            pr: Reg::new(0),
        }
    }
}

/// System configuration registers (only the EXTI routing part is used)
#[repr(C)]
pub struct SyscfgRegisters {
    pub cfgr: [Reg; 2],
    /// EXTI line to port routing, four lines per register
    pub exticr: [Reg; 4],
}

impl SyscfgRegisters {
    pub const fn reset() -> Self {
        Self {
            cfgr: [Reg::new(0), Reg::new(0)],
            exticr: [Reg::new(0), Reg::new(0), Reg::new(0), Reg::new(0)],
        }
    }
}

/// Peripheral addresses and interrupt wiring of a chip family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipLayout {
    /// GPIO block base, indexed by [`Port::number`] (A-F, H); 0 = absent
    pub gpio: [usize; 7],
    pub exti: usize,
    pub syscfg: usize,
    /// EXTICR port code, indexed by [`Port::number`]
    pub exticr_port: [u8; 7],
    /// NVIC interrupt number serving each EXTI line
    pub exti_irq: [u16; 16],
    /// Implemented NVIC priority bits
    pub nvic_prio_bits: u8,
}

/// STM32L1xx
pub const STM32L1: ChipLayout = ChipLayout {
    gpio: [
        0x4002_0000, // A
        0x4002_0400, // B
        0x4002_0800, // C
        0x4002_0C00, // D
        0x4002_1000, // E
        0x4002_1800, // F
        0x4002_1400, // H
    ],
    exti: 0x4001_0400,
    syscfg: 0x4001_0000,
    exticr_port: [0, 1, 2, 3, 4, 6, 5],
    exti_irq: [6, 7, 8, 9, 10, 23, 23, 23, 23, 23, 40, 40, 40, 40, 40, 40],
    nvic_prio_bits: 4,
};

/// References to every register block the backend touches
#[derive(Clone, Copy)]
pub struct Registers {
    /// Indexed by [`Port::number`]; `None` for ports the chip lacks
    pub ports: [Option<&'static GpioRegisters>; 7],
    pub exti: &'static ExtiRegisters,
    pub syscfg: &'static SyscfgRegisters,
}

impl Registers {
    /// Register blocks at the addresses of `layout`
    ///
    /// # Safety
    ///
    /// `layout` must describe the running chip, and nothing else may
    /// access these blocks while the returned references are in use.
    pub unsafe fn from_layout(layout: &ChipLayout) -> Self {
        let mut ports = [None; 7];
        for (slot, &base) in ports.iter_mut().zip(layout.gpio.iter()) {
            if base != 0 {
                *slot = Some(&*(base as *const GpioRegisters));
            }
        }
        Self {
            ports,
            exti: &*(layout.exti as *const ExtiRegisters),
            syscfg: &*(layout.syscfg as *const SyscfgRegisters),
        }
    }

    /// Register block of a native port
    pub fn port(&self, port: Port) -> Option<&'static GpioRegisters> {
        match port {
            Port::Expander => None,
            native => self.ports[native.number() as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field() {
        let reg = Reg::new(0xFFFF_FFFF);
        reg.set_field(10, 2, 0b01);
        assert_eq!(reg.read(), 0xFFFF_F7FF);
        reg.set_field(0, 4, 0);
        assert_eq!(reg.read(), 0xFFFF_F7F0);
    }

    #[test]
    fn test_register_offsets() {
        let gpio = GpioRegisters::reset();
        let base = &gpio as *const _ as usize;
        assert_eq!(&gpio.idr as *const _ as usize - base, 0x10);
        assert_eq!(&gpio.bsrr as *const _ as usize - base, 0x18);
        assert_eq!(&gpio.afr[1] as *const _ as usize - base, 0x24);

        let exti = ExtiRegisters::reset();
        let base = &exti as *const _ as usize;
        assert_eq!(&exti.pr as *const _ as usize - base, 0x14);

        let syscfg = SyscfgRegisters::reset();
        let base = &syscfg as *const _ as usize;
        assert_eq!(&syscfg.exticr[0] as *const _ as usize - base, 0x08);
    }
}
