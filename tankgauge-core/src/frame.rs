//! Frame Decoding for Tank Sensor Advertisements
//!
//! ## Wire Format
//!
//! Every supported sensor model broadcasts the same fixed layout inside its
//! manufacturer-data blob. Offsets are normative; the decoder must match
//! them bit-exactly:
//!
//! ```text
//! Byte | Field
//! -----|----------------------------------------------------------
//!  0   | Sync byte - identifies the sensor model
//!  1   | Battery - raw ADC counts, 32 counts per volt
//!  2   | Temperature - low 7 bits, offset by 40 °C (bit 7 reserved)
//!  3   | Distance low byte
//!  4   | Distance high byte (bits 0-5) + read quality (bits 6-7)
//!  5-7 | Reserved
//!  8   | Accelerometer X
//!  9   | Accelerometer Y
//! ```
//!
//! Bytes 3 and 4 combine little-endian; the distance occupies the low
//! 14 bits (0-16383 mm) and the sensor's 2-bit confidence code sits in the
//! top of byte 4.
//!
//! ## Accelerometer Bytes
//!
//! The accelerometer bytes are carried verbatim as unsigned 0-255. The
//! vendor has never published a sign convention and a two's-complement
//! reading is plausible, so the decoder deliberately does not reinterpret
//! them. Callers only need relative tilt to check sensor placement.
//!
//! ## Purity
//!
//! Parsing is a pure function of the byte slice: no side effects, no
//! shared state, safe to call concurrently from any number of threads.

use crate::constants::{
    BATTERY_COUNTS_PER_VOLT, BATTERY_EMPTY_VOLTS, BATTERY_SPAN_VOLTS, MIN_FRAME_LEN,
    TEMP_RAW_OFFSET_C,
};
use crate::errors::{DecodeError, DecodeResult};

/// Sensor model enumeration
///
/// Maps sync bytes to the known device generations. The table is closed:
/// an advertisement with any other sync byte is rejected rather than
/// guessed at, since newer models may change the frame layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SensorModel {
    /// Pro Plus (M1015)
    ProPlus = 0x03,
    /// Pro Check (M1017)
    ProCheck = 0x04,
    /// Pro 200
    Pro200 = 0x05,
    /// Pro H2O
    ProH2O = 0x08,
    /// Pro H2O Plus
    ProH2OPlus = 0x09,
    /// Lippert BottleCheck
    BottleCheck = 0x0A,
    /// TD40
    Td40 = 0x0B,
    /// TD200
    Td200 = 0x0C,
}

impl SensorModel {
    /// Look up the model for a sync byte
    pub const fn from_sync_byte(sync_byte: u8) -> Option<Self> {
        match sync_byte {
            0x03 => Some(SensorModel::ProPlus),
            0x04 => Some(SensorModel::ProCheck),
            0x05 => Some(SensorModel::Pro200),
            0x08 => Some(SensorModel::ProH2O),
            0x09 => Some(SensorModel::ProH2OPlus),
            0x0A => Some(SensorModel::BottleCheck),
            0x0B => Some(SensorModel::Td40),
            0x0C => Some(SensorModel::Td200),
            _ => None,
        }
    }

    /// Get the sync byte this model advertises
    pub const fn sync_byte(&self) -> u8 {
        *self as u8
    }

    /// Get human-readable model name
    pub const fn name(&self) -> &'static str {
        match self {
            SensorModel::ProPlus => "Pro Plus (M1015)",
            SensorModel::ProCheck => "Pro Check (M1017)",
            SensorModel::Pro200 => "Pro 200",
            SensorModel::ProH2O => "Pro H2O",
            SensorModel::ProH2OPlus => "Pro H2O Plus",
            SensorModel::BottleCheck => "Lippert BottleCheck",
            SensorModel::Td40 => "TD40",
            SensorModel::Td200 => "TD200",
        }
    }
}

/// Typed fields unpacked from one advertisement frame
///
/// Raw values are stored as broadcast; calibrated accessors derive the
/// user-facing quantities. Created once per successful parse, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Sensor model identified by the sync byte
    pub model: SensorModel,
    /// Battery ADC counts (0-255)
    pub battery_raw: u8,
    /// Temperature counts (0-127, 7-bit masked)
    pub temp_raw: u8,
    /// Measured distance in millimeters (0-16383, 14-bit masked)
    pub distance_raw_mm: u16,
    /// Read confidence code (0-3)
    pub quality_raw: u8,
    /// Accelerometer X byte, raw unsigned
    pub accel_x: u8,
    /// Accelerometer Y byte, raw unsigned
    pub accel_y: u8,
}

impl DecodedFrame {
    /// Unpack the fixed frame layout from a manufacturer payload.
    ///
    /// Fails with [`DecodeError::FrameTooShort`] below 10 bytes and
    /// [`DecodeError::UnknownModel`] for unrecognized sync bytes. The
    /// bitmasks guarantee `distance_raw_mm <= 16383` and
    /// `quality_raw <= 3` on every successful parse.
    pub fn parse(payload: &[u8]) -> DecodeResult<Self> {
        if payload.len() < MIN_FRAME_LEN {
            return Err(DecodeError::FrameTooShort {
                required: MIN_FRAME_LEN,
                actual: payload.len(),
            });
        }

        let model = SensorModel::from_sync_byte(payload[0]).ok_or(DecodeError::UnknownModel {
            sync_byte: payload[0],
        })?;

        let low = payload[3] as u16;
        let high = payload[4] as u16;

        Ok(Self {
            model,
            battery_raw: payload[1],
            temp_raw: payload[2] & 0x7F,
            distance_raw_mm: ((high << 8) | low) & 0x3FFF,
            quality_raw: ((high >> 6) & 0x03) as u8,
            accel_x: payload[8],
            accel_y: payload[9],
        })
    }

    /// Temperature in Celsius: `temp_raw - 40`, spanning -40 to 87 °C
    pub const fn temperature_c(&self) -> i16 {
        self.temp_raw as i16 - TEMP_RAW_OFFSET_C
    }

    /// Battery voltage from raw ADC counts
    pub fn battery_volts(&self) -> f64 {
        self.battery_raw as f64 / BATTERY_COUNTS_PER_VOLT
    }

    /// Battery charge percent, clamped to 0-100.
    ///
    /// Linear across the usable CR2032 voltage span. Rounding is
    /// half-away-from-zero; the clamp makes any tie-break invisible at the
    /// extremes (a fresh cell reads above the 100% point, see the battery
    /// constants).
    pub fn battery_percent(&self) -> u8 {
        let percent = (self.battery_volts() - BATTERY_EMPTY_VOLTS) / BATTERY_SPAN_VOLTS * 100.0;
        libm::round(percent).clamp(0.0, 100.0) as u8
    }

    /// Read confidence scaled to percent: 0, 33, 67 or 100
    pub fn quality_percent(&self) -> u8 {
        libm::round(self.quality_raw as f64 / 3.0 * 100.0) as u8
    }
}
