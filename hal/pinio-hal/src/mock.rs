//! Recording backend for unit tests

use core::cell::{Cell, RefCell};

use heapless::Vec;

use crate::backend::{BoundPin, GpioBackend, PinAddress, ToggleAtomicity};
use crate::config::{Edge, IrqHandler, IrqMode, IrqPriority, PinMode, PinSettings};
use crate::pin::PinName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Init(PinName, PinSettings),
    SetInterrupt(PinName, IrqMode, IrqPriority),
    RemoveInterrupt(PinName),
    Write(PinName, u32),
    Toggle(PinName),
    Read(PinName),
}

/// Records every primitive call and keeps a latch per pin
pub struct MockBackend {
    calls: RefCell<Vec<Call, 64>>,
    levels: Cell<u128>,
    bindings: RefCell<[Option<(IrqMode, IrqHandler)>; PinName::COUNT]>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            levels: Cell::new(0),
            bindings: RefCell::new([None; PinName::COUNT]),
        }
    }

    pub fn calls(&self) -> Vec<Call, 64> {
        self.calls.borrow().clone()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().iter().filter(|b| b.is_some()).count()
    }

    /// Simulate an edge on an input; returns whether a handler ran
    pub fn edge(&self, name: PinName, edge: Edge) -> bool {
        let binding = self.bindings.borrow()[name.as_u8() as usize];
        match binding {
            Some((mode, handler)) if mode.triggers_on(edge) => {
                handler();
                true
            }
            _ => false,
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call).ok();
    }

    fn set_level(&self, name: PinName, high: bool) {
        let mask = 1u128 << name.as_u8();
        let levels = self.levels.get();
        self.levels
            .set(if high { levels | mask } else { levels & !mask });
    }

    fn level(&self, name: PinName) -> bool {
        self.levels.get() & (1u128 << name.as_u8()) != 0
    }
}

impl GpioBackend for MockBackend {
    type Port = u8;

    const TOGGLE: ToggleAtomicity = ToggleAtomicity::Unprotected;

    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<u8> {
        assert!(name.is_connected(), "backend saw NC");
        self.record(Call::Init(name, *settings));
        self.bindings.borrow_mut()[name.as_u8() as usize] = None;
        if settings.mode == PinMode::Output {
            self.set_level(name, settings.initial_level() != 0);
        }
        PinAddress {
            pin_index: name.index() as u16,
            port: name.as_u8() / 16,
            port_index: name.as_u8() as u16,
        }
    }

    fn set_interrupt(
        &self,
        pin: BoundPin<'_, u8>,
        mode: IrqMode,
        priority: IrqPriority,
        handler: IrqHandler,
    ) {
        self.record(Call::SetInterrupt(pin.name, mode, priority));
        self.bindings.borrow_mut()[pin.name.as_u8() as usize] = Some((mode, handler));
    }

    fn remove_interrupt(&self, pin: BoundPin<'_, u8>) {
        self.record(Call::RemoveInterrupt(pin.name));
        self.bindings.borrow_mut()[pin.name.as_u8() as usize] = None;
    }

    fn write(&self, pin: BoundPin<'_, u8>, value: u32) {
        self.record(Call::Write(pin.name, value));
        self.set_level(pin.name, value != 0);
    }

    fn toggle(&self, pin: BoundPin<'_, u8>) {
        self.record(Call::Toggle(pin.name));
        self.set_level(pin.name, !self.level(pin.name));
    }

    fn read(&self, pin: BoundPin<'_, u8>) -> u32 {
        self.record(Call::Read(pin.name));
        self.level(pin.name) as u32
    }
}
