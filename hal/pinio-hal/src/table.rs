//! Board pin tables
//!
//! Firmware typically declares its wiring as a static table of labels,
//! pin names and settings. [`PinTable`] initializes every entry through
//! the dispatch layer and keeps the resulting descriptors for lookup by
//! label. Entries wired to [`PinName::NC`] are allowed and stay inert.

use core::fmt;

use heapless::Vec;

use crate::backend::GpioBackend;
use crate::config::PinSettings;
use crate::gpio::Gpio;
use crate::pin::PinName;

/// One wiring entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoardPin {
    /// Logical name used by firmware (e.g. "led", "radio_dio0")
    pub label: &'static str,
    /// Physical pin, or `NC` if absent on this board
    pub name: PinName,
    pub settings: PinSettings,
}

impl BoardPin {
    pub const fn new(label: &'static str, name: PinName, settings: PinSettings) -> Self {
        Self {
            label,
            name,
            settings,
        }
    }
}

/// Errors when building a pin table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Physical pin already claimed by another entry
    PinInUse(PinName),
    /// More entries than the table can hold
    TableFull,
    /// Label used twice
    DuplicateLabel,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinInUse(name) => write!(f, "pin {} already in use", name),
            Self::TableFull => write!(f, "pin table full"),
            Self::DuplicateLabel => write!(f, "duplicate pin label"),
        }
    }
}

/// Tracks which pins are claimed
///
/// Distinct pin names address disjoint bits, so claiming a name at most
/// once guarantees exclusive use of each physical pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinAllocator {
    /// Bitmask of claimed pins, indexed by pin number
    allocated: u128,
}

impl PinAllocator {
    pub const fn new() -> Self {
        Self { allocated: 0 }
    }

    /// Claim a pin
    ///
    /// `NC` can be claimed any number of times.
    pub fn allocate(&mut self, name: PinName) -> Result<(), TableError> {
        if !name.is_connected() {
            return Ok(());
        }
        let mask = 1u128 << name.as_u8();
        if self.allocated & mask != 0 {
            return Err(TableError::PinInUse(name));
        }
        self.allocated |= mask;
        Ok(())
    }

    /// Release a pin
    pub fn release(&mut self, name: PinName) {
        if name.is_connected() {
            self.allocated &= !(1u128 << name.as_u8());
        }
    }

    /// Check if a pin is claimed
    pub fn is_allocated(&self, name: PinName) -> bool {
        name.is_connected() && self.allocated & (1u128 << name.as_u8()) != 0
    }

    /// Number of claimed pins
    pub fn allocated_count(&self) -> u32 {
        self.allocated.count_ones()
    }
}

/// Initialized descriptors for a board's wiring table
pub struct PinTable<P, const N: usize> {
    entries: Vec<(&'static str, Gpio<P>), N>,
    allocator: PinAllocator,
}

impl<P: Copy, const N: usize> PinTable<P, N> {
    /// Initialize every entry of `pins` on `backend`
    ///
    /// Validation happens before any pin is touched, so a rejected table
    /// leaves the hardware unconfigured.
    pub fn init<B>(backend: &B, pins: &[BoardPin]) -> Result<Self, TableError>
    where
        B: GpioBackend<Port = P>,
    {
        if pins.len() > N {
            return Err(TableError::TableFull);
        }

        let mut allocator = PinAllocator::new();
        for (i, pin) in pins.iter().enumerate() {
            allocator.allocate(pin.name)?;
            if pins[..i].iter().any(|other| other.label == pin.label) {
                return Err(TableError::DuplicateLabel);
            }
        }

        let mut entries = Vec::new();
        for pin in pins {
            let gpio = Gpio::init(backend, pin.name, pin.settings);
            entries
                .push((pin.label, gpio))
                .map_err(|_| TableError::TableFull)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("pin table: {} entries, {} connected", entries.len(), allocator.allocated_count());

        Ok(Self { entries, allocator })
    }

    /// Look up a descriptor by label
    pub fn get(&self, label: &str) -> Option<&Gpio<P>> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, gpio)| gpio)
    }

    /// Look up a descriptor by label for re-initialization
    pub fn get_mut(&mut self, label: &str) -> Option<&mut Gpio<P>> {
        self.entries
            .iter_mut()
            .find(|(l, _)| *l == label)
            .map(|(_, gpio)| gpio)
    }

    /// Pins claimed by this table
    pub fn allocator(&self) -> &PinAllocator {
        &self.allocator
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(label, descriptor)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Gpio<P>)> {
        self.entries.iter().map(|(label, gpio)| (*label, gpio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Pull;
    use crate::mock::MockBackend;

    const BOARD: [BoardPin; 4] = [
        BoardPin::new("led", PinName::PA_5, PinSettings::output(0)),
        BoardPin::new("button", PinName::PC_13, PinSettings::input(Pull::Up)),
        BoardPin::new("buzzer", PinName::NC, PinSettings::output(0)),
        BoardPin::new("tcxo", PinName::NC, PinSettings::output(1)),
    ];

    #[test]
    fn test_allocator() {
        let mut alloc = PinAllocator::new();

        assert!(alloc.allocate(PinName::PB_11).is_ok());
        assert!(alloc.is_allocated(PinName::PB_11));

        // Can't allocate same pin twice
        assert_eq!(
            alloc.allocate(PinName::PB_11),
            Err(TableError::PinInUse(PinName::PB_11))
        );

        // NC is never exclusive
        assert!(alloc.allocate(PinName::NC).is_ok());
        assert!(alloc.allocate(PinName::NC).is_ok());
        assert!(!alloc.is_allocated(PinName::NC));

        // Release and re-allocate
        alloc.release(PinName::PB_11);
        assert!(!alloc.is_allocated(PinName::PB_11));
        assert!(alloc.allocate(PinName::PB_11).is_ok());
        assert!(alloc.allocate(PinName::IOE_15).is_ok());
        assert_eq!(alloc.allocated_count(), 2);
    }

    #[test]
    fn test_table_init_and_lookup() {
        let backend = MockBackend::new();
        let table: PinTable<u8, 8> = PinTable::init(&backend, &BOARD).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.allocator().allocated_count(), 2);

        let led = table.get("led").unwrap();
        led.write(&backend, 1);
        assert_eq!(led.read(&backend), 1);

        let buzzer = table.get("buzzer").unwrap();
        assert!(!buzzer.is_connected());
        assert_eq!(buzzer.read(&backend), 0);

        assert!(table.get("missing").is_none());
        assert_eq!(backend.calls().len(), 4); // 2 inits, write, read
    }

    #[test]
    fn test_table_rejects_duplicate_pin() {
        let backend = MockBackend::new();
        let pins = [
            BoardPin::new("a", PinName::PA_1, PinSettings::output(0)),
            BoardPin::new("b", PinName::PA_1, PinSettings::input(Pull::None)),
        ];
        let result: Result<PinTable<u8, 4>, _> = PinTable::init(&backend, &pins);
        assert_eq!(result.err(), Some(TableError::PinInUse(PinName::PA_1)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_table_rejects_duplicate_label() {
        let backend = MockBackend::new();
        let pins = [
            BoardPin::new("x", PinName::PA_1, PinSettings::output(0)),
            BoardPin::new("x", PinName::PA_2, PinSettings::output(0)),
        ];
        let result: Result<PinTable<u8, 4>, _> = PinTable::init(&backend, &pins);
        assert_eq!(result.err(), Some(TableError::DuplicateLabel));
    }

    #[test]
    fn test_table_full() {
        let backend = MockBackend::new();
        let result: Result<PinTable<u8, 2>, _> = PinTable::init(&backend, &BOARD);
        assert_eq!(result.err(), Some(TableError::TableFull));
    }

    #[test]
    fn test_reinit_through_table() {
        let backend = MockBackend::new();
        let mut table: PinTable<u8, 8> = PinTable::init(&backend, &BOARD).unwrap();

        let button = table.get_mut("button").unwrap();
        button.reinit(&backend, PinSettings::input(Pull::Down));
        assert_eq!(table.get("button").unwrap().pull(), Pull::Down);
        assert_eq!(table.iter().count(), 4);
    }
}
