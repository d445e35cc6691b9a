//! Memory address type.
//!
//! This module defines the address fed to the cache engine. It provides the following:
//! 1. **Type Safety:** A 32-bit wrapper, so a wrong-width address cannot reach the engine.
//! 2. **Parsing:** Conversion from hexadecimal trace tokens and 32-character binary strings.
//! 3. **Field Split:** The tag/index/offset triple produced by a cache geometry.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use super::constants::ADDRESS_WIDTH;
use super::error::AddressError;

/// A 32-bit memory address.
///
/// The width precondition of address decomposition is carried by the type:
/// every `Address` has exactly `ADDRESS_WIDTH` bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u32);

impl Address {
    /// Creates a new address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Parses a hexadecimal address token.
    ///
    /// An optional `0x`/`0X` prefix is accepted. Leading zeros are allowed, but
    /// the value must fit in 32 bits.
    ///
    /// # Arguments
    ///
    /// * `token` - Hexadecimal text such as `0x1fffff50` or `7ffe0a`.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Empty` for an empty token, `InvalidDigit` for a
    /// non-hex character, and `Width` when the value needs more than 32 bits.
    pub fn from_hex(token: &str) -> Result<Self, AddressError> {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        if digits.is_empty() {
            return Err(AddressError::Empty);
        }
        // from_str_radix tolerates a leading sign; trace tokens never carry one.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidDigit {
                token: token.to_string(),
            });
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow => AddressError::Width {
                    token: token.to_string(),
                },
                _ => AddressError::InvalidDigit {
                    token: token.to_string(),
                },
            })
    }

    /// Parses a binary address of exactly `ADDRESS_WIDTH` characters, most
    /// significant bit first.
    ///
    /// # Errors
    ///
    /// Returns `AddressError::Empty` for an empty string, `Width` when the
    /// string is not exactly 32 characters long, and `InvalidDigit` for any
    /// character other than `0` or `1`.
    pub fn from_binary(bits: &str) -> Result<Self, AddressError> {
        if bits.is_empty() {
            return Err(AddressError::Empty);
        }
        if bits.len() != ADDRESS_WIDTH as usize {
            return Err(AddressError::Width {
                token: bits.to_string(),
            });
        }
        bits.bytes()
            .try_fold(0u32, |acc, b| match b {
                b'0' => Ok(acc << 1),
                b'1' => Ok((acc << 1) | 1),
                _ => Err(AddressError::InvalidDigit {
                    token: bits.to_string(),
                }),
            })
            .map(Self)
    }

    /// Renders the address as a zero-padded 32-character binary string.
    pub fn to_binary(self) -> String {
        format!("{:032b}", self.0)
    }
}

impl From<u32> for Address {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s.trim())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// An address split into its three contiguous bit fields.
///
/// Produced by `CacheGeometry::decompose`; field widths come from the geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressFields {
    /// High-order bits identifying the memory block. Compared for equality only.
    pub tag: u32,
    /// Set selector.
    pub index: usize,
    /// Byte within the block. Not used by the structural simulation.
    pub offset: u32,
}
