//! Reading Assembly
//!
//! Composes the pipeline: payload extraction, frame decode, temperature
//! compensation, tank geometry. One advertisement in, one [`TankReading`]
//! out - or a defined [`DecodeError`] which the caller treats as "no
//! reading" and discards. The sensor broadcasts again within seconds, so
//! a dropped frame costs nothing.
//!
//! Every stage is a pure function; the only effect is reading the clock
//! to stamp the result. The assembler holds no state and may run
//! concurrently on independent advertisements without locking.
//!
//! Quality filtering is deliberately NOT done here. The configured
//! minimum belongs to the subscribing caller, which may want to surface
//! low-confidence readings differently rather than drop them; see
//! [`DecodeConfig::accepts`].

use crate::advert::{manufacturer_payload, MacAddress};
use crate::errors::{DecodeError, DecodeResult};
use crate::frame::{DecodedFrame, SensorModel};
use crate::medium::{compensate_distance, MediumType};
use crate::tank::{TankSpec, DEFAULT_TANK_ID};
use crate::time::{TimeSource, Timestamp};

/// Millimeters per inch, for the imperial distance convenience accessor
const MM_PER_INCH: f64 = 25.4;

/// Decoding configuration supplied by the subscribing caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeConfig {
    /// Medium being measured, selects the compensation curve
    pub medium_type: MediumType,
    /// Tank geometry used for the fill calculation
    pub tank: &'static TankSpec,
    /// Minimum read-quality percent the caller intends to accept.
    ///
    /// Carried here so one struct travels with the subscription, but only
    /// enforced by the caller (via [`DecodeConfig::accepts`]) - the
    /// decoder itself never drops readings on quality.
    pub minimum_quality: u8,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            medium_type: MediumType::default(),
            tank: TankSpec::for_id(DEFAULT_TANK_ID),
            minimum_quality: 0,
        }
    }
}

impl DecodeConfig {
    /// Build a config from a medium and a tank id.
    ///
    /// Unknown tank ids fall back to the default spec, matching the
    /// behavior of the tank table lookup.
    pub fn new(medium_type: MediumType, tank_id: &str) -> Self {
        Self {
            medium_type,
            tank: TankSpec::for_id(tank_id),
            minimum_quality: 0,
        }
    }

    /// Set the minimum quality percent the caller intends to enforce
    pub fn with_minimum_quality(mut self, percent: u8) -> Self {
        self.minimum_quality = percent;
        self
    }

    /// Caller-side quality policy: does this reading meet the configured
    /// minimum?
    pub fn accepts(&self, reading: &TankReading) -> bool {
        reading.quality_percent >= self.minimum_quality
    }
}

/// One complete decoded sensor reading
///
/// Immutable snapshot assembled from a single advertisement; ownership
/// passes to the caller, which typically replaces its previously held
/// reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TankReading {
    /// Address of the advertising sensor
    pub mac_address: MacAddress,
    /// Sensor model from the sync byte
    pub model: SensorModel,
    /// Battery charge, 0-100
    pub battery_percent: u8,
    /// Uncompensated distance in mm (0-16383)
    pub distance_raw_mm: u16,
    /// Temperature-compensated distance in mm; negative only under a
    /// negative compensation factor
    pub compensated_distance_mm: i32,
    /// Medium temperature in °C (-40 to 87)
    pub temperature_c: i16,
    /// Read confidence scaled to percent: 0, 33, 67 or 100
    pub quality_percent: u8,
    /// Raw 2-bit read confidence code
    pub quality_raw: u8,
    /// Accelerometer X byte, raw unsigned
    pub accel_x: u8,
    /// Accelerometer Y byte, raw unsigned
    pub accel_y: u8,
    /// Tank fill level, 0.0-100.0
    pub tank_level_percent: f64,
    /// Medium the compensation was computed for
    pub medium_type: MediumType,
    /// Id of the tank spec the fill level was computed for
    pub tank_type: &'static str,
    /// When the reading was assembled, from the caller's clock
    pub timestamp: Timestamp,
}

impl TankReading {
    /// Model identifier byte
    pub const fn model_id(&self) -> u8 {
        self.model.sync_byte()
    }

    /// Human-readable model name
    pub const fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Compensated distance in inches, for imperial display surfaces
    pub fn compensated_distance_in(&self) -> f64 {
        self.compensated_distance_mm as f64 / MM_PER_INCH
    }

    /// Check the reading against a quality threshold percent
    pub fn meets_quality(&self, minimum_percent: u8) -> bool {
        self.quality_percent >= minimum_percent
    }

    /// Age of this reading relative to `now` on the same clock
    pub fn age_ms(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.timestamp)
    }
}

/// Decode one advertisement event into a reading.
///
/// Selects the vendor blob from the manufacturer-data map, then runs the
/// frame/compensation/geometry pipeline. Fails with
/// [`DecodeError::PayloadAbsent`] when the advertisement carries nothing
/// for this vendor.
pub fn decode_advertisement<'a, I>(
    address: MacAddress,
    manufacturer_data: I,
    config: &DecodeConfig,
    clock: &dyn TimeSource,
) -> DecodeResult<TankReading>
where
    I: IntoIterator<Item = (u16, &'a [u8])>,
{
    let payload = manufacturer_payload(manufacturer_data).ok_or(DecodeError::PayloadAbsent)?;
    decode_payload(address, payload, config, clock)
}

/// Decode an already-extracted manufacturer payload into a reading.
///
/// For collaborators whose Bluetooth stack filters on manufacturer id
/// before delivery, so the map lookup has already happened.
pub fn decode_payload(
    address: MacAddress,
    payload: &[u8],
    config: &DecodeConfig,
    clock: &dyn TimeSource,
) -> DecodeResult<TankReading> {
    let frame = DecodedFrame::parse(payload)?;
    let compensated =
        compensate_distance(frame.distance_raw_mm, frame.temp_raw, config.medium_type);
    let tank_level_percent = config.tank.fill_percent(compensated as f64);

    Ok(TankReading {
        mac_address: address,
        model: frame.model,
        battery_percent: frame.battery_percent(),
        distance_raw_mm: frame.distance_raw_mm,
        compensated_distance_mm: compensated,
        temperature_c: frame.temperature_c(),
        quality_percent: frame.quality_percent(),
        quality_raw: frame.quality_raw,
        accel_x: frame.accel_x,
        accel_y: frame.accel_y,
        tank_level_percent,
        medium_type: config.medium_type,
        tank_type: config.tank.id,
        timestamp: clock.now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MANUFACTURER_ID;
    use crate::time::FixedClock;

    const ADDRESS: MacAddress = MacAddress::new([0xC4, 0x47, 0x33, 0x01, 0x02, 0x03]);

    /// Pro Check frame: battery 80 counts, temp 60 counts (20 °C),
    /// distance 400 mm, quality 3
    const PAYLOAD: [u8; 10] = [0x04, 80, 60, 0x90, 0xC1, 0, 0, 0, 10, 250];

    #[test]
    fn full_pipeline_produces_reading() {
        let config = DecodeConfig::new(MediumType::Propane, "20lb_v");
        let clock = FixedClock::new(42_000);

        let reading = decode_payload(ADDRESS, &PAYLOAD, &config, &clock).unwrap();

        assert_eq!(reading.mac_address, ADDRESS);
        assert_eq!(reading.model, SensorModel::ProCheck);
        assert_eq!(reading.model_id(), 0x04);
        assert_eq!(reading.model_name(), "Pro Check (M1017)");
        // 0xC190 & 0x3FFF = 0x0190 = 400
        assert_eq!(reading.distance_raw_mm, 400);
        assert_eq!(reading.quality_raw, 3);
        assert_eq!(reading.quality_percent, 100);
        assert_eq!(reading.temperature_c, 20);
        assert_eq!(reading.accel_x, 10);
        assert_eq!(reading.accel_y, 250);
        assert_eq!(reading.medium_type, MediumType::Propane);
        assert_eq!(reading.tank_type, "20lb_v");
        assert_eq!(reading.timestamp, 42_000);
        assert!((0.0..=100.0).contains(&reading.tank_level_percent));

        // Propane factor at t = 60: 0.573045 - 0.16932 - 0.01926 = 0.384465
        assert_eq!(reading.compensated_distance_mm, 153);
    }

    #[test]
    fn advertisement_map_is_searched_for_vendor_id() {
        let config = DecodeConfig::default();
        let clock = FixedClock::new(0);
        let other: &[u8] = &[0x05, 0x00];
        let map = [(0x004C, other), (MANUFACTURER_ID, &PAYLOAD[..])];

        assert!(decode_advertisement(ADDRESS, map, &config, &clock).is_ok());
        assert_eq!(
            decode_advertisement(ADDRESS, [(0x004C, other)], &config, &clock),
            Err(DecodeError::PayloadAbsent)
        );
    }

    #[test]
    fn frame_errors_pass_through() {
        let config = DecodeConfig::default();
        let clock = FixedClock::new(0);

        assert_eq!(
            decode_payload(ADDRESS, &PAYLOAD[..9], &config, &clock),
            Err(DecodeError::FrameTooShort {
                required: 10,
                actual: 9,
            })
        );

        let mut unknown = PAYLOAD;
        unknown[0] = 0x07;
        assert_eq!(
            decode_payload(ADDRESS, &unknown, &config, &clock),
            Err(DecodeError::UnknownModel { sync_byte: 0x07 })
        );
    }

    #[test]
    fn quality_policy_is_callers_not_decoders() {
        let config = DecodeConfig::new(MediumType::Propane, "20lb_v").with_minimum_quality(80);
        let clock = FixedClock::new(0);

        // Quality bits zeroed: decode still succeeds
        let mut low_quality = PAYLOAD;
        low_quality[4] = 0x01;
        let reading = decode_payload(ADDRESS, &low_quality, &config, &clock).unwrap();
        assert_eq!(reading.quality_percent, 0);

        // ...and the policy helper rejects it
        assert!(!config.accepts(&reading));
        assert!(reading.meets_quality(0));
        assert!(!reading.meets_quality(33));
    }

    #[test]
    fn unknown_tank_id_decodes_with_default_spec() {
        let config = DecodeConfig::new(MediumType::Propane, "definitely_not_a_tank");
        let clock = FixedClock::new(0);
        let reading = decode_payload(ADDRESS, &PAYLOAD, &config, &clock).unwrap();
        assert_eq!(reading.tank_type, "20lb_v");
    }

    #[test]
    fn reading_age_and_units() {
        let config = DecodeConfig::default();
        let clock = FixedClock::new(5_000);
        let reading = decode_payload(ADDRESS, &PAYLOAD, &config, &clock).unwrap();

        assert_eq!(reading.age_ms(8_000), 3_000);
        // Clocks that jump backwards saturate instead of wrapping
        assert_eq!(reading.age_ms(1_000), 0);

        let inches = reading.compensated_distance_in();
        assert!((inches - reading.compensated_distance_mm as f64 / 25.4).abs() < 1e-12);
    }
}
