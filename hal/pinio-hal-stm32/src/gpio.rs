//! GPIO backend for STM32 GPIO/EXTI/SYSCFG blocks
//!
//! EXTI has one line per pin *index*, shared by every port: PA_5 and PB_5
//! both use line 5, and only one of them can own it at a time. The backend
//! keeps one callback slot per line; binding a pin takes the line over,
//! and a pin can only detach a binding it owns.
//!
//! Writes go through BSRR and are atomic. There is no toggle register on
//! these parts, so `toggle` reads ODR and writes BSRR inside a critical
//! section ([`ToggleAtomicity::Locked`]).

use core::cell::RefCell;
use core::ops::RangeInclusive;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use pinio_hal::{
    BoundPin, GpioBackend, IrqHandler, IrqMode, IrqPriority, OutputType, PinAddress, PinMode,
    PinName, PinSettings, Port, Pull, ToggleAtomicity,
};

use crate::irq::IrqController;
use crate::regs::{GpioRegisters, Registers};

/// Number of EXTI lines wired to GPIO pins
pub const EXTI_LINES: usize = 16;

#[derive(Clone, Copy)]
struct LineBinding {
    owner: PinName,
    handler: IrqHandler,
}

/// Register-level GPIO backend
pub struct Stm32Gpio<C> {
    regs: Registers,
    exticr_port: [u8; 7],
    irq: C,
    lines: Mutex<CriticalSectionRawMutex, RefCell<[Option<LineBinding>; EXTI_LINES]>>,
}

const fn moder_bits(mode: PinMode) -> u32 {
    match mode {
        PinMode::Input => 0b00,
        PinMode::Output => 0b01,
        PinMode::AlternateFunction => 0b10,
        PinMode::Analog => 0b11,
    }
}

const fn pupdr_bits(pull: Pull) -> u32 {
    match pull {
        Pull::None => 0b00,
        Pull::Up => 0b01,
        Pull::Down => 0b10,
    }
}

impl<C: IrqController> Stm32Gpio<C> {
    /// Create a backend over `regs`
    ///
    /// `exticr_port` maps [`Port::number`] to the chip's EXTICR port code
    /// (see [`ChipLayout::exticr_port`](crate::regs::ChipLayout)).
    pub fn new(regs: Registers, exticr_port: [u8; 7], irq: C) -> Self {
        Self {
            regs,
            exticr_port,
            irq,
            lines: Mutex::new(RefCell::new([None; EXTI_LINES])),
        }
    }

    /// Interrupt controller in use
    pub fn irq_controller(&self) -> &C {
        &self.irq
    }

    /// Pin currently owning EXTI `line`
    pub fn line_owner(&self, line: u8) -> Option<PinName> {
        self.lines
            .lock(|lines| lines.borrow().get(line as usize).copied().flatten())
            .map(|binding| binding.owner)
    }

    /// Dispatch pending EXTI lines to their handlers
    ///
    /// Call from the EXTI interrupt handlers with the lines each one
    /// serves, e.g. `5..=9` from `EXTI9_5`. Handlers run after their
    /// pending bit is cleared and outside the backend's lock.
    pub fn on_exti_interrupt(&self, lines: RangeInclusive<u8>) {
        let exti = self.regs.exti;
        for line in lines {
            if line as usize >= EXTI_LINES {
                break;
            }
            let mask = 1u32 << line;
            if exti.pr.read() & exti.imr.read() & mask == 0 {
                continue;
            }
            exti.pr.write(mask);

            let handler = self
                .lines
                .lock(|bindings| bindings.borrow()[line as usize].map(|b| b.handler));
            if let Some(handler) = handler {
                handler();
            }
        }
    }

    fn port_regs(&self, name: PinName) -> (Port, &'static GpioRegisters) {
        let regs = name.port().and_then(|port| Some((port, self.regs.port(port)?)));
        match regs {
            Some(found) => found,
            None => panic!("{} is not a native pin of this chip", name),
        }
    }

    /// Mask `line` and clear its triggers, pending bit and handler,
    /// provided `owner` holds it
    fn detach(&self, bindings: &mut [Option<LineBinding>; EXTI_LINES], line: usize, owner: PinName) {
        match bindings[line] {
            Some(binding) if binding.owner == owner => {}
            _ => return,
        }
        let exti = self.regs.exti;
        let mask = 1u32 << line;
        exti.imr.modify(|v| v & !mask);
        exti.rtsr.modify(|v| v & !mask);
        exti.ftsr.modify(|v| v & !mask);
        exti.pr.write(mask);
        bindings[line] = None;
    }
}

impl<C: IrqController> GpioBackend for Stm32Gpio<C> {
    type Port = &'static GpioRegisters;

    const TOGGLE: ToggleAtomicity = ToggleAtomicity::Locked;

    /// # Panics
    ///
    /// Panics if `name` is an expander pin or its port is absent from the
    /// register set.
    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<Self::Port> {
        let (port, regs) = self.port_regs(name);
        let index = name.index() as u32;
        let bit = 1u32 << index;

        self.lines.lock(|lines| {
            self.detach(&mut lines.borrow_mut(), index as usize, name);

            // Latch the initial level before the driver is enabled
            if settings.mode == PinMode::Output {
                regs.bsrr.write(if settings.initial_value != 0 { bit } else { bit << 16 });
            }
            match settings.output_type {
                OutputType::PushPull => regs.otyper.modify(|v| v & !bit),
                OutputType::OpenDrain => regs.otyper.modify(|v| v | bit),
            }
            let pull = match settings.mode {
                PinMode::Analog => Pull::None,
                _ => settings.pull,
            };
            regs.pupdr.set_field(index * 2, 2, pupdr_bits(pull));
            regs.moder.set_field(index * 2, 2, moder_bits(settings.mode));
        });

        PinAddress {
            pin_index: index as u16,
            port: regs,
            port_index: port.number() as u16,
        }
    }

    fn set_interrupt(
        &self,
        pin: BoundPin<'_, Self::Port>,
        mode: IrqMode,
        priority: IrqPriority,
        handler: IrqHandler,
    ) {
        let line = pin.address.pin_index as usize;
        let mask = 1u32 << line;
        let exti = self.regs.exti;
        let regs = pin.address.port;
        let port_code = self.exticr_port[pin.address.port_index as usize] as u32;

        self.lines.lock(|lines| {
            let mut lines = lines.borrow_mut();

            if mode == IrqMode::None {
                self.detach(&mut lines, line, pin.name);
                return;
            }

            // Taking the line over from whoever owns it
            exti.imr.modify(|v| v & !mask);
            exti.rtsr.modify(|v| v & !mask);
            exti.ftsr.modify(|v| v & !mask);
            lines[line] = None;

            self.regs.syscfg.exticr[line / 4].set_field((line as u32 % 4) * 4, 4, port_code);
            regs.pupdr.set_field(line as u32 * 2, 2, pupdr_bits(pin.pull));
            regs.moder.set_field(line as u32 * 2, 2, moder_bits(PinMode::Input));

            exti.pr.write(mask);

            if mode.rising() {
                exti.rtsr.modify(|v| v | mask);
            }
            if mode.falling() {
                exti.ftsr.modify(|v| v | mask);
            }
            lines[line] = Some(LineBinding {
                owner: pin.name,
                handler,
            });
            self.irq.enable_line(line as u8, priority);
            exti.imr.modify(|v| v | mask);
        });
    }

    fn remove_interrupt(&self, pin: BoundPin<'_, Self::Port>) {
        self.lines.lock(|lines| {
            self.detach(&mut lines.borrow_mut(), pin.address.pin_index as usize, pin.name);
        });
    }

    #[inline]
    fn write(&self, pin: BoundPin<'_, Self::Port>, value: u32) {
        let bit = 1u32 << pin.address.pin_index;
        pin.address
            .port
            .bsrr
            .write(if value != 0 { bit } else { bit << 16 });
    }

    #[inline]
    fn toggle(&self, pin: BoundPin<'_, Self::Port>) {
        let regs = pin.address.port;
        let bit = 1u32 << pin.address.pin_index;
        critical_section::with(|_| {
            let high = regs.odr.read() & bit != 0;
            regs.bsrr.write(if high { bit << 16 } else { bit });
        });
    }

    #[inline]
    fn read(&self, pin: BoundPin<'_, Self::Port>) -> u32 {
        (pin.address.port.idr.read() >> pin.address.pin_index) & 1
    }
}
