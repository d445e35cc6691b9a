//! Cache geometry and address decomposition.
//!
//! A geometry is the validated form of a `CacheConfig`: the three user-facing
//! parameters plus the derived set count and tag/index/offset widths.

use crate::common::addr::{Address, AddressFields};
use crate::common::constants::ADDRESS_WIDTH;
use crate::common::error::ConfigError;

/// Validated cache shape with derived address field widths.
///
/// Immutable once built. `tag_bits + index_bits + offset_bits == ADDRESS_WIDTH`
/// holds for every instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    cache_size_bytes: usize,
    block_size_bytes: usize,
    associativity: usize,
    num_sets: usize,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

/// Rejects zero and non-power-of-two values of a named field.
fn require_power_of_two(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Zero { field });
    }
    if !value.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo { field, value });
    }
    Ok(())
}

/// Mask of the `bits` least significant bits.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

impl CacheGeometry {
    /// Validates a configuration and derives its field widths.
    ///
    /// `num_sets = cache_size / (block_size * associativity)`,
    /// `offset_bits = log2(block_size)`, `index_bits = log2(num_sets)`,
    /// `tag_bits = 32 - index_bits - offset_bits`.
    ///
    /// # Arguments
    ///
    /// * `cache_size_bytes` - Total capacity in bytes.
    /// * `block_size_bytes` - Block size in bytes.
    /// * `associativity` - Blocks per set.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Zero` - any parameter is zero.
    /// * `ConfigError::NotPowerOfTwo` - the cache size, block size, or
    ///   associativity is not an exact power of two (which would leave
    ///   `num_sets` non-integral or not a power of two).
    /// * `ConfigError::AssociativityTooLarge` - more ways than blocks in the cache.
    /// * `ConfigError::AddressTooNarrow` - index and offset need more than 32 bits.
    pub fn new(
        cache_size_bytes: usize,
        block_size_bytes: usize,
        associativity: usize,
    ) -> Result<Self, ConfigError> {
        require_power_of_two("cache_size_bytes", cache_size_bytes)?;
        require_power_of_two("block_size_bytes", block_size_bytes)?;
        if associativity == 0 {
            return Err(ConfigError::Zero {
                field: "associativity",
            });
        }

        let blocks = cache_size_bytes / block_size_bytes;
        if associativity > blocks {
            return Err(ConfigError::AssociativityTooLarge {
                associativity,
                blocks,
            });
        }
        require_power_of_two("associativity", associativity)?;

        let num_sets = blocks / associativity;
        debug_assert!(num_sets.is_power_of_two());

        let offset_bits = block_size_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        let required = offset_bits + index_bits;
        if required > ADDRESS_WIDTH {
            return Err(ConfigError::AddressTooNarrow {
                required,
                width: ADDRESS_WIDTH,
            });
        }

        Ok(Self {
            cache_size_bytes,
            block_size_bytes,
            associativity,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_WIDTH - required,
        })
    }

    /// Total capacity in bytes.
    pub const fn cache_size_bytes(&self) -> usize {
        self.cache_size_bytes
    }

    /// Block size in bytes.
    pub const fn block_size_bytes(&self) -> usize {
        self.block_size_bytes
    }

    /// Blocks per set.
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Width of the offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Splits an address into tag, index, and offset, most significant first.
    ///
    /// Arithmetic is done in 64 bits so that zero-width fields (direct 1-byte
    /// blocks, a single set, or a tagless 4 GiB cache) never shift by the full
    /// register width.
    #[inline]
    pub const fn decompose(&self, addr: Address) -> AddressFields {
        let raw = addr.val() as u64;
        let offset = raw & low_mask(self.offset_bits);
        let index = (raw >> self.offset_bits) & low_mask(self.index_bits);
        let tag = raw >> (self.offset_bits + self.index_bits);
        AddressFields {
            tag: tag as u32,
            index: index as usize,
            offset: offset as u32,
        }
    }

    /// Reassembles an address from its fields; the inverse of `decompose`.
    ///
    /// Bits of each field above its width are discarded.
    pub const fn compose(&self, fields: AddressFields) -> Address {
        let offset = fields.offset as u64 & low_mask(self.offset_bits);
        let index = fields.index as u64 & low_mask(self.index_bits);
        let tag = fields.tag as u64 & low_mask(self.tag_bits);
        let raw = (tag << (self.offset_bits + self.index_bits))
            | (index << self.offset_bits)
            | offset;
        Address::new(raw as u32)
    }
}
