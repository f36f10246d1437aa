use core::fmt;

use crate::color::Color;

/// The seam between the cache and whatever turns a textual spec into a
/// [`Color`]. The cache treats a parse failure as "use fully transparent",
/// so implementations only need to report *that* parsing failed, not
/// recover from it.
pub trait SpecParser {
    fn parse(&self, spec: &str) -> Result<Color, ColorParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    MissingHash,
    InvalidLength,
    InvalidDigit,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ColorParseError::MissingHash => "color spec does not start with '#'",
            ColorParseError::InvalidLength => "invalid hex digit count",
            ColorParseError::InvalidDigit => "invalid hex digit",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColorParseError {}

/// Parses hex color specs in the forms `#RGB`, `#ARGB`, `#RRGGBB`, and
/// `#AARRGGBB`. The alpha channel comes first, and the short forms expand
/// each digit to a full byte (`#F00` == `#FF0000`).
#[derive(Debug, Clone, Copy, Default)]
pub struct HexParser;

impl SpecParser for HexParser {
    fn parse(&self, spec: &str) -> Result<Color, ColorParseError> {
        let digits = spec
            .strip_prefix('#')
            .ok_or(ColorParseError::MissingHash)?
            .as_bytes();

        match digits.len() {
            3 => Ok(Color::from_rgb(
                wide(digits[0])?,
                wide(digits[1])?,
                wide(digits[2])?,
            )),
            4 => Ok(Color::from_argb(
                wide(digits[0])?,
                wide(digits[1])?,
                wide(digits[2])?,
                wide(digits[3])?,
            )),
            6 => Ok(Color::from_rgb(
                byte(digits[0], digits[1])?,
                byte(digits[2], digits[3])?,
                byte(digits[4], digits[5])?,
            )),
            8 => Ok(Color::from_argb(
                byte(digits[0], digits[1])?,
                byte(digits[2], digits[3])?,
                byte(digits[4], digits[5])?,
                byte(digits[6], digits[7])?,
            )),
            _ => Err(ColorParseError::InvalidLength),
        }
    }
}

fn nibble(digit: u8) -> Result<u8, ColorParseError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        _ => Err(ColorParseError::InvalidDigit),
    }
}

/// Expands a single digit to a byte, e.g. `F` -> `0xFF`.
fn wide(digit: u8) -> Result<u8, ColorParseError> {
    Ok(nibble(digit)? * 17)
}

fn byte(hi: u8, lo: u8) -> Result<u8, ColorParseError> {
    Ok(nibble(hi)? << 4 | nibble(lo)?)
}
