//! Core decoding engine for TankGauge
//!
//! Turns BLE advertisements from ultrasonic tank level sensors into
//! structured readings: fixed-layout frame parsing, per-medium temperature
//! compensation, and closed-form tank geometry.
//!
//! Key constraints:
//! - Pure and stateless: safe to call concurrently from any thread
//! - No heap allocation, no I/O; runs on no_std receivers
//! - Every malformed advertisement is a typed error, never a panic
//!
//! ```no_run
//! use tankgauge_core::{decode_payload, DecodeConfig, MacAddress, MediumType, SystemClock};
//!
//! let config = DecodeConfig::new(MediumType::Propane, "20lb_v");
//! let address = MacAddress::new([0xC4, 0x47, 0x33, 0x01, 0x02, 0x03]);
//! let payload = [0x04, 80, 60, 0x90, 0x01, 0, 0, 0, 0, 0];
//!
//! match decode_payload(address, &payload, &config, &SystemClock) {
//!     Ok(reading) => {}, // Hand off to the subscriber
//!     Err(e) => {},      // Discard; the sensor broadcasts again shortly
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod advert;
pub mod constants;
pub mod errors;
pub mod frame;
pub mod medium;
pub mod reading;
pub mod tank;
pub mod time;

// Public API
pub use advert::{manufacturer_payload, MacAddress};
pub use errors::{DecodeError, DecodeResult};
pub use frame::{DecodedFrame, SensorModel};
pub use medium::{compensate_distance, Coefficients, MediumType};
pub use reading::{decode_advertisement, decode_payload, DecodeConfig, TankReading};
pub use tank::{TankOrientation, TankSpec, DEFAULT_TANK_ID, TANK_SPECS};
pub use time::{FixedClock, TimeSource, Timestamp};

#[cfg(feature = "std")]
pub use time::SystemClock;

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
