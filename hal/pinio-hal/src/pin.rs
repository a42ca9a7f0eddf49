//! Pin identity
//!
//! Every addressable pin on the target family has a [`PinName`]: ports
//! A-F and H with 16 pins each, sixteen pins routed to an external I/O
//! expander, and the [`PinName::NC`] sentinel for "no pin bound".
//!
//! The numeric value of a name encodes its location: bits 7..4 select the
//! port, bits 3..0 the pin within it. Expander pins occupy the block after
//! port H.

use core::fmt;
use core::str::FromStr;

/// Pins per port (and per expander)
pub const PINS_PER_PORT: u8 = 16;

macro_rules! pin_names {
    ($($name:ident = $value:literal),* $(,)?) => {
        /// Logical name of a GPIO pin
        ///
        /// `NC` is the "not connected" sentinel. Descriptors built from it
        /// are inert: the dispatch layer turns every operation on them into
        /// a no-op.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        pub enum PinName {
            $($name = $value,)*
            /// Not connected
            NC = 0xFF,
        }

        impl PinName {
            /// Every connected pin name, in ascending numeric order
            pub const ALL: &'static [PinName] = &[$(PinName::$name),*];

            /// Create a pin name from its numeric value
            pub const fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $($value => Some(PinName::$name),)*
                    0xFF => Some(PinName::NC),
                    _ => None,
                }
            }
        }
    };
}

pin_names! {
    PA_0 = 0, PA_1 = 1, PA_2 = 2, PA_3 = 3, PA_4 = 4, PA_5 = 5, PA_6 = 6, PA_7 = 7,
    PA_8 = 8, PA_9 = 9, PA_10 = 10, PA_11 = 11, PA_12 = 12, PA_13 = 13, PA_14 = 14, PA_15 = 15,

    PB_0 = 16, PB_1 = 17, PB_2 = 18, PB_3 = 19, PB_4 = 20, PB_5 = 21, PB_6 = 22, PB_7 = 23,
    PB_8 = 24, PB_9 = 25, PB_10 = 26, PB_11 = 27, PB_12 = 28, PB_13 = 29, PB_14 = 30, PB_15 = 31,

    PC_0 = 32, PC_1 = 33, PC_2 = 34, PC_3 = 35, PC_4 = 36, PC_5 = 37, PC_6 = 38, PC_7 = 39,
    PC_8 = 40, PC_9 = 41, PC_10 = 42, PC_11 = 43, PC_12 = 44, PC_13 = 45, PC_14 = 46, PC_15 = 47,

    PD_0 = 48, PD_1 = 49, PD_2 = 50, PD_3 = 51, PD_4 = 52, PD_5 = 53, PD_6 = 54, PD_7 = 55,
    PD_8 = 56, PD_9 = 57, PD_10 = 58, PD_11 = 59, PD_12 = 60, PD_13 = 61, PD_14 = 62, PD_15 = 63,

    PE_0 = 64, PE_1 = 65, PE_2 = 66, PE_3 = 67, PE_4 = 68, PE_5 = 69, PE_6 = 70, PE_7 = 71,
    PE_8 = 72, PE_9 = 73, PE_10 = 74, PE_11 = 75, PE_12 = 76, PE_13 = 77, PE_14 = 78, PE_15 = 79,

    PF_0 = 80, PF_1 = 81, PF_2 = 82, PF_3 = 83, PF_4 = 84, PF_5 = 85, PF_6 = 86, PF_7 = 87,
    PF_8 = 88, PF_9 = 89, PF_10 = 90, PF_11 = 91, PF_12 = 92, PF_13 = 93, PF_14 = 94, PF_15 = 95,

    PH_0 = 96, PH_1 = 97, PH_2 = 98, PH_3 = 99, PH_4 = 100, PH_5 = 101, PH_6 = 102, PH_7 = 103,
    PH_8 = 104, PH_9 = 105, PH_10 = 106, PH_11 = 107, PH_12 = 108, PH_13 = 109, PH_14 = 110, PH_15 = 111,

    IOE_0 = 112, IOE_1 = 113, IOE_2 = 114, IOE_3 = 115, IOE_4 = 116, IOE_5 = 117, IOE_6 = 118, IOE_7 = 119,
    IOE_8 = 120, IOE_9 = 121, IOE_10 = 122, IOE_11 = 123, IOE_12 = 124, IOE_13 = 125, IOE_14 = 126, IOE_15 = 127,
}

impl PinName {
    /// Number of connected pin names
    pub const COUNT: usize = 128;

    /// Build a pin name from its port and index within the port
    pub const fn new(port: Port, index: u8) -> Option<Self> {
        if index >= PINS_PER_PORT {
            return None;
        }
        Self::from_u8(port.number() * PINS_PER_PORT + index)
    }

    /// Get the numeric value of this name
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this name denotes a real pin
    pub const fn is_connected(self) -> bool {
        !matches!(self, PinName::NC)
    }

    /// `None` for the sentinel, `Some(self)` otherwise
    pub const fn connected(self) -> Option<Self> {
        if self.is_connected() {
            Some(self)
        } else {
            None
        }
    }

    /// Check if this pin lives on the I/O expander
    pub const fn is_expander(self) -> bool {
        matches!(self.port(), Some(Port::Expander))
    }

    /// Port (or expander) owning this pin
    pub const fn port(self) -> Option<Port> {
        if !self.is_connected() {
            return None;
        }
        Port::from_number(self.as_u8() / PINS_PER_PORT)
    }

    /// Bit position of this pin within its port
    ///
    /// Meaningless for [`PinName::NC`], which reports 0.
    pub const fn index(self) -> u8 {
        if self.is_connected() {
            self.as_u8() % PINS_PER_PORT
        } else {
            0
        }
    }
}

impl Default for PinName {
    fn default() -> Self {
        PinName::NC
    }
}

impl From<Option<PinName>> for PinName {
    fn from(pin: Option<PinName>) -> Self {
        pin.unwrap_or(PinName::NC)
    }
}

impl fmt::Display for PinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port() {
            None => f.write_str("NC"),
            Some(Port::Expander) => write!(f, "IOE_{}", self.index()),
            Some(port) => match port.letter() {
                Some(letter) => write!(f, "P{}_{}", letter, self.index()),
                None => f.write_str("NC"),
            },
        }
    }
}

/// Errors from parsing a pin name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinParseError {
    /// Input was empty
    Empty,
    /// Port letter or prefix not recognised
    UnknownPort,
    /// Pin index missing, malformed, or out of range (0-15 valid)
    InvalidIndex,
}

impl fmt::Display for PinParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty pin name"),
            Self::UnknownPort => write!(f, "unknown port"),
            Self::InvalidIndex => write!(f, "invalid pin index"),
        }
    }
}

/// Parse a pin name from config
///
/// Supports formats:
/// - "PA_5" or "PA5" -> port A, pin 5
/// - "IOE_3" or "IOE3" -> expander pin 3
/// - "NC" -> not connected
///
/// Prefixes are case-insensitive.
impl FromStr for PinName {
    type Err = PinParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PinParseError::Empty);
        }
        if s.eq_ignore_ascii_case("NC") {
            return Ok(PinName::NC);
        }

        let (port, rest) = match s.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("IOE") => (Port::Expander, &s[3..]),
            _ => {
                let mut chars = s.chars();
                if !matches!(chars.next(), Some('P' | 'p')) {
                    return Err(PinParseError::UnknownPort);
                }
                let letter = chars.next().ok_or(PinParseError::UnknownPort)?;
                let port = Port::from_letter(letter).ok_or(PinParseError::UnknownPort)?;
                (port, chars.as_str())
            }
        };

        let digits = rest.strip_prefix('_').unwrap_or(rest);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PinParseError::InvalidIndex);
        }
        let index: u8 = digits.parse().map_err(|_| PinParseError::InvalidIndex)?;

        PinName::new(port, index).ok_or(PinParseError::InvalidIndex)
    }
}

/// Group of up to 16 pins sharing one register block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    H,
    /// External I/O expander
    Expander,
}

impl Port {
    /// Native ports in register-block order
    pub const NATIVE: [Port; 7] = [Port::A, Port::B, Port::C, Port::D, Port::E, Port::F, Port::H];

    /// Position of this port in the pin numbering
    pub const fn number(self) -> u8 {
        match self {
            Port::A => 0,
            Port::B => 1,
            Port::C => 2,
            Port::D => 3,
            Port::E => 4,
            Port::F => 5,
            Port::H => 6,
            Port::Expander => 7,
        }
    }

    /// Port at the given position in the pin numbering
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Port::A),
            1 => Some(Port::B),
            2 => Some(Port::C),
            3 => Some(Port::D),
            4 => Some(Port::E),
            5 => Some(Port::F),
            6 => Some(Port::H),
            7 => Some(Port::Expander),
            _ => None,
        }
    }

    /// Port letter as used in pin names (`None` for the expander)
    pub const fn letter(self) -> Option<char> {
        match self {
            Port::A => Some('A'),
            Port::B => Some('B'),
            Port::C => Some('C'),
            Port::D => Some('D'),
            Port::E => Some('E'),
            Port::F => Some('F'),
            Port::H => Some('H'),
            Port::Expander => None,
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Port::A),
            'B' => Some(Port::B),
            'C' => Some(Port::C),
            'D' => Some(Port::D),
            'E' => Some(Port::E),
            'F' => Some(Port::F),
            'H' => Some(Port::H),
            _ => None,
        }
    }
}
