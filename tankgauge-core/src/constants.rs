//! Protocol and Calibration Constants for TankGauge Core
//!
//! This module defines the wire-format, calibration, and policy constants
//! used throughout the decoding pipeline. All numeric values are defined
//! here with their purpose and provenance; modules reference these instead
//! of repeating magic numbers.

// ===== ADVERTISEMENT PROTOCOL =====

/// BLE company identifier the sensors advertise under.
///
/// Manufacturer-data maps carry one blob per company id; only this entry
/// holds a tank level frame. All other ids are ignored.
pub const MANUFACTURER_ID: u16 = 0x0059;

/// GATT service UUID advertised alongside the manufacturer data.
///
/// Not consumed by the decoder itself, but scanners commonly filter on it
/// before handing advertisements to this crate.
pub const SERVICE_UUID: &str = "0000fee5-0000-1000-8000-00805f9b34fb";

/// Minimum manufacturer payload length in bytes.
///
/// The fixed frame layout places the last consumed field (accelerometer Y)
/// at byte offset 9; anything shorter cannot be decoded.
pub const MIN_FRAME_LEN: usize = 10;

// ===== FIELD CALIBRATION =====

/// Offset subtracted from the 7-bit raw temperature to get Celsius.
///
/// `temp_raw` spans 0-127, so reported temperature spans -40 to 87 °C.
pub const TEMP_RAW_OFFSET_C: i16 = 40;

/// Battery ADC counts per volt.
///
/// The battery byte is a direct ADC sample of the coin cell; dividing by
/// this scale yields volts (255 counts ≈ 7.97 V full scale).
pub const BATTERY_COUNTS_PER_VOLT: f64 = 32.0;

/// Cell voltage treated as 0% battery (V).
///
/// Below this a CR2032 can no longer drive the ultrasonic transducer.
pub const BATTERY_EMPTY_VOLTS: f64 = 2.2;

/// Usable voltage span above [`BATTERY_EMPTY_VOLTS`] (V).
///
/// A fresh cell reads ~2.85 V under load; the percentage is linear across
/// this span and clamped at both ends.
pub const BATTERY_SPAN_VOLTS: f64 = 0.65;

// ===== CALLER POLICY =====

/// Read-quality thresholds (percent) offered to callers.
///
/// The sensor reports a 2-bit confidence code (0-3) which the decoder
/// scales to 0/33/67/100%. Callers that filter readings conventionally
/// pick a minimum from this set; the decoder itself never filters.
pub const QUALITY_THRESHOLDS: [u8; 4] = [0, 20, 50, 80];

/// Seconds without an advertisement before data is considered unhealthy.
///
/// Sensors broadcast every few seconds when awake; two minutes of silence
/// usually means poor placement or interference.
pub const DATA_HEALTH_TIMEOUT_SECONDS: u64 = 120;

/// Seconds without an advertisement before a sensor is considered offline.
pub const OFFLINE_TIMEOUT_SECONDS: u64 = 30 * 60;

// ===== TANK GEOMETRY =====

/// Default steel wall thickness subtracted from measured distance (mm).
///
/// 3.175 mm is 1/8 inch, the nominal wall of common LP cylinders. The
/// sensor measures from the outside bottom of the tank, so the wall is
/// dead distance before the liquid column starts.
pub const DEFAULT_WALL_THICKNESS_MM: f64 = 3.175;
