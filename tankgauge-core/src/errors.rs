//! Error Types for Advertisement Decoding Failures
//!
//! ## Design Philosophy
//!
//! TankGauge's error system is designed with embedded receivers in mind:
//!
//! 1. **Small Size**: Each error variant carries only a few bytes of context
//!    since errors are produced on the advertisement hot path and may be
//!    counted or queued by the caller.
//!
//! 2. **No Heap Allocation**: All error data is inline - no String, only
//!    primitive context fields. This keeps memory usage deterministic.
//!
//! 3. **Copy Semantics**: Errors implement Copy for efficient return from
//!    functions without move semantics complications.
//!
//! 4. **Locally Absorbed**: Every variant is non-fatal. A malformed
//!    advertisement is simply discarded; the sensor broadcasts again within
//!    seconds and a fresh frame supersedes it. There is no retry logic.
//!
//! ## Error Categories
//!
//! ### Absent Data
//! - `PayloadAbsent`: the advertisement carries no blob under the expected
//!   manufacturer id. Common - most BLE traffic belongs to other vendors.
//!
//! ### Malformed Frames
//! - `FrameTooShort`: fewer bytes than the fixed layout requires.
//! - `UnknownModel`: sync byte outside the recognized model table, either a
//!   newer device generation or another product sharing the manufacturer id.

use thiserror_no_std::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Decode errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Advertisement carries no data under the expected manufacturer id
    #[error("no manufacturer payload for vendor 0x0059")]
    PayloadAbsent,

    /// Payload shorter than the fixed frame layout
    #[error("frame of {actual} bytes, need at least {required}")]
    FrameTooShort {
        /// Minimum frame length the layout requires
        required: usize,
        /// Actual payload length received
        actual: usize,
    },

    /// Sync byte does not map to a known sensor model
    #[error("unknown model sync byte {sync_byte:#04x}")]
    UnknownModel {
        /// The unrecognized first payload byte
        sync_byte: u8,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::PayloadAbsent => defmt::write!(fmt, "payload absent"),
            Self::FrameTooShort { required, actual } =>
                defmt::write!(fmt, "frame {} bytes, need {}", actual, required),
            Self::UnknownModel { sync_byte } =>
                defmt::write!(fmt, "unknown model {:#04x}", sync_byte),
        }
    }
}
