//! Simulated GPIO backend
//!
//! [`SimGpio`] models every pin name in memory so firmware built on
//! `pinio-hal` can be exercised on the host: outputs latch what is
//! written, inputs follow their pull resistor unless an external level is
//! driven with [`SimGpio::drive`], and driven edges fire bound interrupt
//! handlers the way an edge-triggered IRQ controller would.
//!
//! All state sits behind one critical-section mutex, so the backend can
//! live in a `static` and toggling is a single indivisible step
//! ([`ToggleAtomicity::Hardware`]). Handlers run outside the lock and may
//! call back into the backend.

#![cfg_attr(not(test), no_std)]

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use pinio_hal::{
    BoundPin, Edge, GpioBackend, IrqHandler, IrqMode, IrqPriority, OutputType, PinAddress,
    PinMode, PinName, PinSettings, Pull, ToggleAtomicity,
};

/// Active interrupt binding of a simulated pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Binding {
    pub mode: IrqMode,
    pub priority: IrqPriority,
}

#[derive(Clone, Copy)]
struct SimPin {
    settings: Option<PinSettings>,
    /// Output latch
    latch: bool,
    /// Level forced by the outside world
    driven: Option<bool>,
    binding: Option<(Binding, IrqHandler)>,
}

impl SimPin {
    const IDLE: Self = Self {
        settings: None,
        latch: false,
        driven: None,
        binding: None,
    };

    /// Logic level seen on the line
    fn level(&self) -> bool {
        let Some(settings) = self.settings else {
            return self.driven.unwrap_or(false);
        };
        let bias = match settings.pull {
            Pull::Up => Some(true),
            Pull::Down => Some(false),
            Pull::None => None,
        };
        let external = self.driven.or(bias).unwrap_or(false);

        match (settings.mode, settings.output_type) {
            (PinMode::Output, OutputType::PushPull) => self.latch,
            // Released open-drain line floats to whatever pulls it
            (PinMode::Output, OutputType::OpenDrain) => self.latch && external,
            (PinMode::Analog, _) => false,
            (PinMode::Input | PinMode::AlternateFunction, _) => external,
        }
    }
}

struct State {
    pins: [SimPin; PinName::COUNT],
    calls: u32,
}

/// In-memory GPIO backend
pub struct SimGpio {
    state: Mutex<CriticalSectionRawMutex, RefCell<State>>,
}

impl Default for SimGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl SimGpio {
    /// Create a backend with every pin unconfigured and undriven
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(State {
                pins: [SimPin::IDLE; PinName::COUNT],
                calls: 0,
            })),
        }
    }

    /// Force an external level onto a pin
    ///
    /// Fires the pin's handler if the resulting transition qualifies under
    /// its edge mode. Returns whether a handler ran.
    pub fn drive(&self, name: PinName, high: bool) -> bool {
        self.set_external(name, Some(high))
    }

    /// Stop driving a pin, letting it fall back to its pull
    pub fn release(&self, name: PinName) -> bool {
        self.set_external(name, None)
    }

    /// Settings applied by the last initialization
    pub fn settings(&self, name: PinName) -> Option<PinSettings> {
        self.with_pin(name, |pin| pin.settings).flatten()
    }

    /// Current interrupt binding of a pin
    pub fn binding(&self, name: PinName) -> Option<Binding> {
        self.with_pin(name, |pin| pin.binding.map(|(binding, _)| binding))
            .flatten()
    }

    /// Number of pins with an interrupt binding
    pub fn active_bindings(&self) -> usize {
        self.state.lock(|state| {
            state
                .borrow()
                .pins
                .iter()
                .filter(|pin| pin.binding.is_some())
                .count()
        })
    }

    /// Output latch of a pin (what was last written)
    pub fn output_latch(&self, name: PinName) -> bool {
        self.with_pin(name, |pin| pin.latch).unwrap_or(false)
    }

    /// Total backend primitive calls so far
    pub fn backend_calls(&self) -> u32 {
        self.state.lock(|state| state.borrow().calls)
    }

    fn with_pin<R>(&self, name: PinName, f: impl FnOnce(&SimPin) -> R) -> Option<R> {
        if !name.is_connected() {
            return None;
        }
        self.state
            .lock(|state| Some(f(&state.borrow().pins[name.as_u8() as usize])))
    }

    /// Apply `f` to a pin's state, counting one backend call
    fn update<R>(&self, name: PinName, f: impl FnOnce(&mut SimPin) -> R) -> R {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.calls += 1;
            f(&mut state.pins[name.as_u8() as usize])
        })
    }

    fn set_external(&self, name: PinName, level: Option<bool>) -> bool {
        if !name.is_connected() {
            return false;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("sim: {} driven {}", name, level);

        let handler = self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let pin = &mut state.pins[name.as_u8() as usize];
            let before = pin.level();
            pin.driven = level;
            let edge = Edge::between(before, pin.level())?;
            match pin.binding {
                Some((binding, handler)) if binding.mode.triggers_on(edge) => Some(handler),
                _ => None,
            }
        });

        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl GpioBackend for SimGpio {
    /// Port number (0 = A, ..., 7 = expander block)
    type Port = u8;

    const TOGGLE: ToggleAtomicity = ToggleAtomicity::Hardware;

    fn init(&self, name: PinName, settings: &PinSettings) -> PinAddress<u8> {
        self.update(name, |pin| {
            pin.settings = Some(*settings);
            pin.binding = None;
            if settings.mode == PinMode::Output {
                pin.latch = settings.initial_value != 0;
            }
        });
        PinAddress {
            pin_index: name.index() as u16,
            port: name.port().map_or(0, |port| port.number()),
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
        self.update(pin.name, |sim| {
            sim.binding = match mode {
                IrqMode::None => None,
                mode => Some((Binding { mode, priority }, handler)),
            };
        });
    }

    fn remove_interrupt(&self, pin: BoundPin<'_, u8>) {
        self.update(pin.name, |sim| sim.binding = None);
    }

    fn write(&self, pin: BoundPin<'_, u8>, value: u32) {
        self.update(pin.name, |sim| sim.latch = value != 0);
    }

    fn toggle(&self, pin: BoundPin<'_, u8>) {
        self.update(pin.name, |sim| sim.latch = !sim.latch);
    }

    fn read(&self, pin: BoundPin<'_, u8>) -> u32 {
        self.update(pin.name, |sim| sim.level() as u32)
    }
}
