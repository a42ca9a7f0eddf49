//! Electrical and interrupt configuration
//!
//! These enumerations form the initialization and interrupt-binding
//! contract shared by every backend.

/// Direction / function of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinMode {
    /// Digital input
    #[default]
    Input,
    /// Digital output
    Output,
    /// Peripheral (alternate) function
    AlternateFunction,
    /// Analog
    Analog,
}

/// Output driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputType {
    /// Actively drives both levels
    #[default]
    PushPull,
    /// Only sinks; high level relies on a pull resistor
    OpenDrain,
}

/// Passive bias resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// Signal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// Transition between two sampled levels, if any
    pub const fn between(previous: bool, current: bool) -> Option<Self> {
        match (previous, current) {
            (false, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
            _ => None,
        }
    }
}

/// Which transitions trigger an interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IrqMode {
    #[default]
    None,
    RisingEdge,
    FallingEdge,
    RisingFallingEdge,
}

impl IrqMode {
    /// Check if an edge qualifies under this mode
    pub const fn triggers_on(self, edge: Edge) -> bool {
        matches!(
            (self, edge),
            (IrqMode::RisingEdge, Edge::Rising)
                | (IrqMode::FallingEdge, Edge::Falling)
                | (IrqMode::RisingFallingEdge, _)
        )
    }

    pub const fn rising(self) -> bool {
        self.triggers_on(Edge::Rising)
    }

    pub const fn falling(self) -> bool {
        self.triggers_on(Edge::Falling)
    }
}

/// Interrupt priority, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IrqPriority {
    VeryLow,
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

/// Interrupt callback
///
/// Runs in interrupt context once per qualifying edge.
pub type IrqHandler = fn();

/// Complete electrical configuration of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinSettings {
    /// Direction / function
    pub mode: PinMode,
    /// Output driver (ignored for inputs)
    pub output_type: OutputType,
    /// Bias resistor
    pub pull: Pull,
    /// Level driven right after initialization (outputs only, nonzero = high)
    pub initial_value: u32,
}

impl PinSettings {
    /// Create settings from every field
    pub const fn new(mode: PinMode, output_type: OutputType, pull: Pull, initial_value: u32) -> Self {
        Self {
            mode,
            output_type,
            pull,
            initial_value,
        }
    }

    /// Digital input with the given bias
    pub const fn input(pull: Pull) -> Self {
        Self::new(PinMode::Input, OutputType::PushPull, pull, 0)
    }

    /// Push-pull output starting at `initial_value`
    pub const fn output(initial_value: u32) -> Self {
        Self::new(PinMode::Output, OutputType::PushPull, Pull::None, initial_value)
    }

    /// Open-drain output with the given bias
    pub const fn open_drain(pull: Pull, initial_value: u32) -> Self {
        Self::new(PinMode::Output, OutputType::OpenDrain, pull, initial_value)
    }

    /// Analog pin (no bias, no driver)
    pub const fn analog() -> Self {
        Self::new(PinMode::Analog, OutputType::PushPull, Pull::None, 0)
    }

    /// Alternate function with the given driver and bias
    pub const fn alternate(output_type: OutputType, pull: Pull) -> Self {
        Self::new(PinMode::AlternateFunction, output_type, pull, 0)
    }

    /// Initial level normalized to 0 / 1
    pub const fn initial_level(&self) -> u32 {
        level(self.initial_value)
    }
}

/// Normalize a written value to 0 / 1 (nonzero = high)
pub const fn level(value: u32) -> u32 {
    (value != 0) as u32
}
