//! MCP23017 16-bit I2C I/O expander
//!
//! The chip is kept in its power-on register layout (`IOCON.BANK = 0`), so
//! every A register is directly followed by its B twin and 16-bit accesses
//! cover both banks in one transfer. Pins `IOE_0..IOE_7` map to GPA0..7 and
//! `IOE_8..IOE_15` to GPB0..7.
//!
//! # Supported configuration
//!
//! - Input with or without the internal 100k pull-up
//! - Push-pull output
//! - Interrupt-on-change, edge derived from the captured level
//!
//! The chip has no pull-downs and no open-drain pin drivers; both requests
//! are logged and ignored. Alternate and analog modes configure the pin as
//! an input. Interrupt priority is meaningless here: the expander raises a
//! single INT line and the host decides how urgently to service it by
//! calling [`Mcp23017::handle_interrupt`].
//!
//! # Bus errors
//!
//! [`GpioBackend`] operations cannot fail, so I2C errors are counted
//! ([`Mcp23017::bus_errors`]), logged, and otherwise swallowed; reads that
//! fail return 0. The register shadows stay authoritative, the next
//! successful write of the same register brings the chip back in sync.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal::i2c::I2c;
use heapless::Vec;
use pinio_hal::{
    BoundPin, Edge, GpioBackend, IrqHandler, IrqMode, IrqPriority, OutputType, PinAddress,
    PinMode, PinName, PinSettings, Pull, ToggleAtomicity,
};

/// MCP23017 register addresses (`IOCON.BANK = 0`)
pub mod reg {
    /// I/O direction (1 = input)
    pub const IODIRA: u8 = 0x00;
    /// Input polarity
    pub const IPOLA: u8 = 0x02;
    /// Interrupt-on-change enable
    pub const GPINTENA: u8 = 0x04;
    /// Default compare value
    pub const DEFVALA: u8 = 0x06;
    /// Interrupt control (0 = compare against previous value)
    pub const INTCONA: u8 = 0x08;
    /// Configuration, mirrored at 0x0B
    pub const IOCON: u8 = 0x0A;
    /// Pull-up enable
    pub const GPPUA: u8 = 0x0C;
    /// Interrupt flags
    pub const INTFA: u8 = 0x0E;
    /// Port value captured at interrupt time
    pub const INTCAPA: u8 = 0x10;
    /// Port value
    pub const GPIOA: u8 = 0x12;
    /// Output latch
    pub const OLATA: u8 = 0x14;
}

/// IOCON.MIRROR: INTA and INTB are wired together
const IOCON_MIRROR: u8 = 1 << 6;

/// Address with A2..A0 tied low
pub const DEFAULT_ADDRESS: u8 = 0x20;

/// Pins per chip
pub const PIN_COUNT: usize = 16;

/// Last values written to the read-modify-write registers
struct Shadow {
    iodir: u16,
    gppu: u16,
    olat: u16,
    gpinten: u16,
}

impl Shadow {
    const RESET: Self = Self {
        iodir: 0xFFFF,
        gppu: 0,
        olat: 0,
        gpinten: 0,
    };

    fn register(&self, reg: u8) -> u16 {
        match reg {
            reg::IODIRA => self.iodir,
            reg::GPPUA => self.gppu,
            reg::OLATA => self.olat,
            reg::GPINTENA => self.gpinten,
            _ => unreachable!("register {:#x} is not shadowed", reg),
        }
    }
}

struct Device<I2C> {
    i2c: I2C,
    address: u8,
    shadow: Shadow,
    handlers: [Option<(IrqMode, IrqHandler)>; PIN_COUNT],
    /// Flags collected from the chip but not yet dispatched
    pending: u16,
    /// Captured levels for the `pending` pins
    captured: u16,
    bus_errors: u32,
}

impl<I2C: I2c> Device<I2C> {
    /// Push one bank of a shadowed register to the chip
    fn store(&mut self, reg: u8, bank: u8) {
        let byte = (self.shadow.register(reg) >> (8 * bank)) as u8;
        if self.i2c.write(self.address, &[reg + bank, byte]).is_err() {
            self.bus_error(reg + bank);
        }
    }

    fn load(&mut self, reg: u8, bank: u8) -> u8 {
        let mut buf = [0u8; 1];
        match self.i2c.write_read(self.address, &[reg + bank], &mut buf) {
            Ok(()) => buf[0],
            Err(_) => {
                self.bus_error(reg + bank);
                0
            }
        }
    }

    /// Read an A/B register pair
    fn load_pair(&mut self, reg: u8) -> u16 {
        let mut buf = [0u8; 2];
        match self.i2c.write_read(self.address, &[reg], &mut buf) {
            Ok(()) => u16::from_le_bytes(buf),
            Err(_) => {
                self.bus_error(reg);
                0
            }
        }
    }

    fn write_pair(&mut self, reg: u8, value: u16) -> Result<(), I2C::Error> {
        let [a, b] = value.to_le_bytes();
        self.i2c.write(self.address, &[reg, a, b])
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn bus_error(&mut self, reg: u8) {
        self.bus_errors = self.bus_errors.wrapping_add(1);
        #[cfg(feature = "defmt")]
        defmt::warn!("mcp23017: bus error at register {=u8:#04x}", reg);
    }

    /// Move latched interrupt flags and captures off the chip
    ///
    /// Reading GPIO or INTCAP re-arms the chip and loses the latched
    /// condition, so anything pending is kept here until dispatched.
    fn collect(&mut self) {
        let flags = self.load_pair(reg::INTFA);
        if flags == 0 {
            return;
        }
        let captured = self.load_pair(reg::INTCAPA);
        self.pending |= flags;
        self.captured = (self.captured & !flags) | (captured & flags);
    }

    /// Drop the handler and stop interrupt-on-change for `pin`
    fn detach(&mut self, pin: usize) {
        let bit = 1u16 << pin;
        self.handlers[pin] = None;
        self.pending &= !bit;
        if self.shadow.gpinten & bit != 0 {
            self.shadow.gpinten &= !bit;
            self.store(reg::GPINTENA, bank_of(pin));
        }
    }
}

const fn bank_of(pin: usize) -> u8 {
    (pin / 8) as u8
}

/// MCP23017 expander backend
///
/// `M` selects the mutex guarding the bus and register shadows; use
/// `CriticalSectionRawMutex` when pins are touched from interrupt handlers.
/// Toggling is a read-modify-write of the output latch shadow under that
/// mutex.
pub struct Mcp23017<M: RawMutex, I2C> {
    device: Mutex<M, RefCell<Device<I2C>>>,
}

impl<M: RawMutex, I2C: I2c> Mcp23017<M, I2C> {
    /// Wrap a bus; call [`Mcp23017::reset`] before configuring pins
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            device: Mutex::new(RefCell::new(Device {
                i2c,
                address,
                shadow: Shadow::RESET,
                handlers: [None; PIN_COUNT],
                pending: 0,
                captured: 0,
                bus_errors: 0,
            })),
        }
    }

    /// Bring the chip into a known state
    ///
    /// All pins become inputs without pull-ups, interrupts are disabled and
    /// every handler is dropped. INTA/INTB are mirrored so one host line
    /// serves both banks.
    pub fn reset(&self) -> Result<(), I2C::Error> {
        self.device.lock(|device| -> Result<(), I2C::Error> {
            let mut device = device.borrow_mut();
            device.shadow = Shadow::RESET;
            device.handlers = [None; PIN_COUNT];
            device.pending = 0;

            let address = device.address;
            device.i2c.write(address, &[reg::IOCON, IOCON_MIRROR])?;
            device.write_pair(reg::GPINTENA, 0)?;
            device.write_pair(reg::IODIRA, 0xFFFF)?;
            device.write_pair(reg::IPOLA, 0)?;
            device.write_pair(reg::DEFVALA, 0)?;
            device.write_pair(reg::INTCONA, 0)?;
            device.write_pair(reg::GPPUA, 0)?;
            device.write_pair(reg::OLATA, 0)?;

            #[cfg(feature = "defmt")]
            defmt::debug!("mcp23017: reset at {=u8:#04x}", address);
            Ok(())
        })
    }

    /// Service the expander's INT line
    ///
    /// Reads the interrupt flags and captured port value (which re-arms the
    /// chip), merges them with edges collected by earlier port reads, then
    /// runs the handler of every flagged pin whose edge matches its mode.
    /// Handlers run after the bus is released. Returns the number of
    /// handlers run.
    pub fn handle_interrupt(&self) -> usize {
        let pending = self.device.lock(|device| {
            let mut device = device.borrow_mut();
            let mut pending: Vec<IrqHandler, PIN_COUNT> = Vec::new();

            device.collect();
            let flags = core::mem::take(&mut device.pending);
            let captured = device.captured;

            for pin in 0..PIN_COUNT {
                let bit = 1u16 << pin;
                if flags & bit == 0 {
                    continue;
                }
                let edge = if captured & bit != 0 {
                    Edge::Rising
                } else {
                    Edge::Falling
                };
                if let Some((mode, handler)) = device.handlers[pin] {
                    if mode.triggers_on(edge) {
                        // One slot per pin
                        let _ = pending.push(handler);
                    }
                }
            }
            pending
        });

        for handler in &pending {
            handler();
        }
        pending.len()
    }

    /// I2C transfers that failed since construction
    pub fn bus_errors(&self) -> u32 {
        self.device.lock(|device| device.borrow().bus_errors)
    }
}

impl<M: RawMutex, I2C: I2c> GpioBackend for Mcp23017<M, I2C> {
    /// Register bank (0 = A, 1 = B)
    type Port = u8;

    const TOGGLE: ToggleAtomicity = ToggleAtomicity::Locked;

    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<u8> {
        debug_assert!(name.is_expander(), "{} is not an expander pin", name);

        let pin = name.index() as usize;
        let bank = bank_of(pin);
        let bit = 1u16 << pin;

        #[cfg(feature = "defmt")]
        defmt::debug!("mcp23017: init {} as {}", name, settings.mode);

        self.device.lock(|device| {
            let mut device = device.borrow_mut();
            device.detach(pin);

            match settings.pull {
                Pull::Up => device.shadow.gppu |= bit,
                Pull::None => device.shadow.gppu &= !bit,
                Pull::Down => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("mcp23017: {} has no pull-down, leaving it floating", name);
                    device.shadow.gppu &= !bit;
                }
            }
            device.store(reg::GPPUA, bank);

            if settings.mode == PinMode::Output {
                if settings.output_type == OutputType::OpenDrain {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("mcp23017: {} has no open-drain driver, using push-pull", name);
                }
                if settings.initial_level() != 0 {
                    device.shadow.olat |= bit;
                } else {
                    device.shadow.olat &= !bit;
                }
                device.store(reg::OLATA, bank);
                device.shadow.iodir &= !bit;
            } else {
                device.shadow.iodir |= bit;
            }
            device.store(reg::IODIRA, bank);
        });

        PinAddress {
            pin_index: pin as u16,
            port: bank,
            port_index: pin as u16,
        }
    }

    fn set_interrupt(
        &self,
        pin: BoundPin<'_, u8>,
        mode: IrqMode,
        _priority: IrqPriority,
        handler: IrqHandler,
    ) {
        let index = pin.address.port_index as usize;
        let bank = pin.address.port;
        let bit = 1u16 << index;

        #[cfg(feature = "defmt")]
        defmt::debug!("mcp23017: {} interrupt {}", pin.name, mode);

        self.device.lock(|device| {
            let mut device = device.borrow_mut();
            // Sibling edges stay queued for the next dispatch
            device.collect();
            device.detach(index);
            if mode == IrqMode::None {
                return;
            }

            if device.shadow.iodir & bit == 0 {
                device.shadow.iodir |= bit;
                device.store(reg::IODIRA, bank);
            }
            device.handlers[index] = Some((mode, handler));
            device.shadow.gpinten |= bit;
            device.store(reg::GPINTENA, bank);
        });
    }

    fn remove_interrupt(&self, pin: BoundPin<'_, u8>) {
        let index = pin.address.port_index as usize;
        self.device
            .lock(|device| device.borrow_mut().detach(index));
    }

    fn write(&self, pin: BoundPin<'_, u8>, value: u32) {
        let bit = 1u16 << pin.address.port_index;
        self.device.lock(|device| {
            let mut device = device.borrow_mut();
            if value != 0 {
                device.shadow.olat |= bit;
            } else {
                device.shadow.olat &= !bit;
            }
            device.store(reg::OLATA, pin.address.port);
        });
    }

    fn toggle(&self, pin: BoundPin<'_, u8>) {
        let bit = 1u16 << pin.address.port_index;
        self.device.lock(|device| {
            let mut device = device.borrow_mut();
            device.shadow.olat ^= bit;
            device.store(reg::OLATA, pin.address.port);
        });
    }

    fn read(&self, pin: BoundPin<'_, u8>) -> u32 {
        let shift = pin.address.port_index % 8;
        let port = self.device.lock(|device| {
            let mut device = device.borrow_mut();
            if device.shadow.gpinten != 0 {
                device.collect();
            }
            device.load(reg::GPIOA, pin.address.port)
        });
        ((port >> shift) & 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use pinio_hal::{Gpio, Routed};
    use pinio_hal_sim::SimGpio;
    use std::rc::Rc;

    /// Register-level model of the chip
    struct Chip {
        regs: [u8; 0x16],
        pointer: u8,
        /// Externally driven pins and their levels
        driven: u16,
        external: u16,
        offline: bool,
    }

    impl Chip {
        fn pair(&self, reg: u8) -> u16 {
            u16::from_le_bytes([self.regs[reg as usize], self.regs[reg as usize + 1]])
        }

        fn set_pair(&mut self, reg: u8, value: u16) {
            let [a, b] = value.to_le_bytes();
            self.regs[reg as usize] = a;
            self.regs[reg as usize + 1] = b;
        }

        fn levels(&self) -> u16 {
            let inputs = self.pair(reg::IODIRA);
            let floating = (self.driven & self.external) | (!self.driven & self.pair(reg::GPPUA));
            (inputs & floating) | (!inputs & self.pair(reg::OLATA))
        }

        /// Drive an input pin from outside
        fn set_input(&mut self, pin: usize, high: bool) {
            let bit = 1u16 << pin;
            let before = self.levels();
            self.driven |= bit;
            if high {
                self.external |= bit;
            } else {
                self.external &= !bit;
            }
            let after = self.levels();
            if (before ^ after) & bit != 0 && self.pair(reg::GPINTENA) & bit != 0 {
                let flags = self.pair(reg::INTFA);
                self.set_pair(reg::INTFA, flags | bit);
                self.set_pair(reg::INTCAPA, after);
            }
        }

        fn poke(&mut self, byte: u8) {
            match self.pointer {
                0x12 | 0x13 => self.regs[self.pointer as usize + 2] = byte,
                0x0E..=0x11 => {}
                reg => self.regs[reg as usize] = byte,
            }
            self.advance();
        }

        fn peek(&mut self) -> u8 {
            let reg = self.pointer;
            let value = match reg {
                0x12 | 0x13 => {
                    // Reading the port also clears the bank's flags
                    self.regs[(reg - 4) as usize] = 0;
                    self.levels().to_le_bytes()[(reg - 0x12) as usize]
                }
                0x10 | 0x11 => {
                    // Reading the capture clears the bank's flags
                    self.regs[(reg - 2) as usize] = 0;
                    self.regs[reg as usize]
                }
                _ => self.regs[reg as usize],
            };
            self.advance();
            value
        }

        fn advance(&mut self) {
            self.pointer = (self.pointer + 1) % self.regs.len() as u8;
        }
    }

    #[derive(Clone)]
    struct FakeBus(Rc<RefCell<Chip>>);

    impl FakeBus {
        fn new() -> Self {
            let mut regs = [0u8; 0x16];
            regs[0] = 0xFF;
            regs[1] = 0xFF;
            Self(Rc::new(RefCell::new(Chip {
                regs,
                pointer: 0,
                driven: 0,
                external: 0,
                offline: false,
            })))
        }

        fn chip(&self) -> std::cell::RefMut<'_, Chip> {
            self.0.borrow_mut()
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            let mut chip = self.0.borrow_mut();
            if chip.offline || address != DEFAULT_ADDRESS {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for operation in operations {
                match operation {
                    Operation::Write(bytes) => {
                        if let Some((&reg, data)) = bytes.split_first() {
                            chip.pointer = reg;
                            for &byte in data {
                                chip.poke(byte);
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for byte in buf.iter_mut() {
                            *byte = chip.peek();
                        }
                    }
                }
            }
            Ok(())
        }
    }

    type Expander = Mcp23017<CriticalSectionRawMutex, FakeBus>;

    fn expander() -> (FakeBus, Expander) {
        let bus = FakeBus::new();
        let mcp = Mcp23017::new(bus.clone(), DEFAULT_ADDRESS);
        mcp.reset().unwrap();
        (bus, mcp)
    }

    #[test]
    fn test_reset_state() {
        let (bus, mcp) = expander();
        let chip = bus.chip();
        assert_eq!(chip.regs[reg::IOCON as usize], IOCON_MIRROR);
        assert_eq!(chip.pair(reg::IODIRA), 0xFFFF);
        assert_eq!(chip.pair(reg::GPINTENA), 0);
        assert_eq!(chip.pair(reg::GPPUA), 0);
        drop(chip);
        assert_eq!(mcp.bus_errors(), 0);
    }

    #[test]
    fn test_output_write_toggle() {
        let (bus, mcp) = expander();
        let led = Gpio::init(&mcp, PinName::IOE_9, PinSettings::output(1));

        assert_eq!(led.address().map(|a| a.port), Some(1));
        assert_eq!(bus.chip().pair(reg::IODIRA) & (1 << 9), 0);
        assert_eq!(bus.chip().pair(reg::OLATA), 1 << 9);
        assert_eq!(led.read(&mcp), 1);

        led.toggle(&mcp);
        assert_eq!(led.read(&mcp), 0);
        led.write(&mcp, 7);
        assert_eq!(led.read(&mcp), 1);
    }

    #[test]
    fn test_input_pulls() {
        let (bus, mcp) = expander();
        let button = Gpio::init(&mcp, PinName::IOE_2, PinSettings::input(Pull::Up));
        assert_eq!(bus.chip().pair(reg::GPPUA), 1 << 2);
        assert_eq!(button.read(&mcp), 1);

        bus.chip().set_input(2, false);
        assert_eq!(button.read(&mcp), 0);

        // No pull-downs on this chip
        let _floating = Gpio::init(&mcp, PinName::IOE_2, PinSettings::input(Pull::Down));
        assert_eq!(bus.chip().pair(reg::GPPUA), 0);
    }

    #[test]
    fn test_interrupt_edges() {
        static RISES: AtomicU32 = AtomicU32::new(0);
        fn on_rise() {
            RISES.fetch_add(1, Ordering::SeqCst);
        }

        let (bus, mcp) = expander();
        let pin = Gpio::init(&mcp, PinName::IOE_11, PinSettings::input(Pull::None));
        pin.set_interrupt(&mcp, IrqMode::RisingEdge, IrqPriority::High, on_rise);
        assert_eq!(bus.chip().pair(reg::GPINTENA), 1 << 11);

        bus.chip().set_input(11, true);
        assert_eq!(mcp.handle_interrupt(), 1);
        assert_eq!(RISES.load(Ordering::SeqCst), 1);

        // Falling edge re-arms the chip without running the handler
        bus.chip().set_input(11, false);
        assert_eq!(mcp.handle_interrupt(), 0);
        assert_eq!(bus.chip().pair(reg::INTFA), 0);

        assert_eq!(mcp.handle_interrupt(), 0);
        assert_eq!(RISES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_binding_keeps_sibling_edge() {
        static HITS: AtomicU32 = AtomicU32::new(0);
        fn on_rise() {
            HITS.fetch_add(1, Ordering::SeqCst);
        }

        let (bus, mcp) = expander();
        let first = Gpio::init(&mcp, PinName::IOE_1, PinSettings::input(Pull::None));
        let second = Gpio::init(&mcp, PinName::IOE_2, PinSettings::input(Pull::None));
        first.set_interrupt(&mcp, IrqMode::RisingEdge, IrqPriority::Medium, on_rise);

        bus.chip().set_input(1, true);
        second.set_interrupt(&mcp, IrqMode::RisingEdge, IrqPriority::Medium, on_rise);

        assert_eq!(mcp.handle_interrupt(), 1);
        assert_eq!(HITS.load(Ordering::SeqCst), 1);
        assert_eq!(mcp.handle_interrupt(), 0);
    }

    #[test]
    fn test_port_read_keeps_pending_edge() {
        static HITS: AtomicU32 = AtomicU32::new(0);
        fn on_rise() {
            HITS.fetch_add(1, Ordering::SeqCst);
        }

        let (bus, mcp) = expander();
        let pin = Gpio::init(&mcp, PinName::IOE_11, PinSettings::input(Pull::None));
        let sibling = Gpio::init(&mcp, PinName::IOE_12, PinSettings::input(Pull::Up));
        pin.set_interrupt(&mcp, IrqMode::RisingEdge, IrqPriority::Medium, on_rise);

        bus.chip().set_input(11, true);
        assert_eq!(sibling.read(&mcp), 1);
        assert_eq!(bus.chip().pair(reg::INTFA), 0);

        assert_eq!(mcp.handle_interrupt(), 1);
        assert_eq!(HITS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reinit_and_remove_drop_binding() {
        static HITS: AtomicU32 = AtomicU32::new(0);
        fn on_edge() {
            HITS.fetch_add(1, Ordering::SeqCst);
        }

        let (bus, mcp) = expander();
        let mut pin = Gpio::init(&mcp, PinName::IOE_0, PinSettings::input(Pull::None));
        pin.set_interrupt(&mcp, IrqMode::RisingFallingEdge, IrqPriority::Low, on_edge);
        pin.reinit(&mcp, PinSettings::input(Pull::None));
        assert_eq!(bus.chip().pair(reg::GPINTENA), 0);

        pin.set_interrupt(&mcp, IrqMode::RisingFallingEdge, IrqPriority::Low, on_edge);
        pin.remove_interrupt(&mcp);
        bus.chip().set_input(0, true);
        assert_eq!(mcp.handle_interrupt(), 0);
        assert_eq!(HITS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bus_errors_are_counted() {
        let (bus, mcp) = expander();
        let pin = Gpio::init(&mcp, PinName::IOE_4, PinSettings::input(Pull::Up));

        bus.chip().offline = true;
        assert_eq!(pin.read(&mcp), 0);
        pin.write(&mcp, 1);
        assert_eq!(mcp.bus_errors(), 2);

        bus.chip().offline = false;
        assert_eq!(pin.read(&mcp), 1);
        assert!(mcp.reset().is_ok());
    }

    #[test]
    fn test_routed_with_native_backend() {
        let bus = FakeBus::new();
        let board = Routed::new(SimGpio::new(), Expander::new(bus.clone(), DEFAULT_ADDRESS));
        board.expander().reset().unwrap();

        let status = Gpio::init(&board, PinName::PA_5, PinSettings::output(0));
        let relay = Gpio::init(&board, PinName::IOE_15, PinSettings::output(0));

        relay.write(&board, 1);
        assert_eq!(bus.chip().pair(reg::OLATA), 1 << 15);
        assert_eq!(status.read(&board), 0);
        assert!(!board.native().output_latch(PinName::PA_5));

        status.toggle(&board);
        assert!(board.native().output_latch(PinName::PA_5));
        assert_eq!(relay.read(&board), 1);
    }
}
