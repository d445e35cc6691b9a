//! Common types shared across the simulator.
//!
//! This module provides:
//! 1. **Address Type:** A strong 32-bit address type and its tag/index/offset split.
//! 2. **Constants:** The fixed address width every geometry is derived from.
//! 3. **Error Handling:** Configuration, address-parsing, and trace errors.

/// Address type and decomposed address fields.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, address parsing, and trace decoding.
pub mod error;

pub use addr::{Address, AddressFields};
pub use constants::ADDRESS_WIDTH;
pub use error::{AddressError, ConfigError, SimError, TraceError};
