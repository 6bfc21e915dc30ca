//! Temperature Compensation for the Measured Medium
//!
//! ## Physics Background
//!
//! The sensor times an ultrasonic echo through the tank contents and
//! converts it to distance assuming a fixed speed of sound. The actual
//! acoustic velocity depends on the medium and shifts with temperature,
//! so the raw distance must be scaled by a medium-specific correction:
//!
//! ```text
//! factor = c0 + c1·t + c2·t²     (t = raw temperature counts, 0-127)
//! compensated_mm = trunc(distance_raw_mm × factor)
//! ```
//!
//! The quadratic coefficients come from the vendor's per-medium
//! calibration. Media with near-identical acoustic behavior share a
//! triple: all water-based contents use one curve, all liquid fuels
//! another.
//!
//! ## Truncation
//!
//! The product is truncated toward zero, not rounded - this matches the
//! sensor vendor's reference implementation and is observable in the
//! output. Truncation-toward-zero and floor diverge for negative
//! products, so the rule is pinned by test: should a calibration curve
//! ever go negative, the result is a small negative distance which the
//! geometry stage resolves to an empty tank.

/// Supported medium types for compensation
///
/// Closed set; behavior is entirely data-driven through the coefficient
/// lookup, so adding a medium is a table edit, not a new type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediumType {
    /// LP gas, the factory calibration target
    #[default]
    Propane,
    /// Air column measurement (inverted sensor mounting)
    Air,
    /// Potable water tank
    FreshWater,
    /// Gray water holding tank
    WasteWater,
    /// Sewage holding tank
    BlackWater,
    /// Aerated bait/live well
    LiveWell,
    /// Gasoline fuel tank
    Gasoline,
    /// Diesel fuel tank
    Diesel,
    /// Liquefied natural gas
    Lng,
    /// Lubricating oil
    Oil,
    /// Hydraulic oil reservoir
    HydraulicOil,
    /// User-calibrated medium, falls back to the propane curve
    Custom,
}

/// Quadratic correction coefficients for one medium
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Constant term
    pub c0: f64,
    /// Linear term, per raw temperature count
    pub c1: f64,
    /// Quadratic term, per squared raw temperature count
    pub c2: f64,
}

impl MediumType {
    /// Get the compensation coefficients for this medium.
    ///
    /// Water-like media share one triple, liquid fuels another; the values
    /// are the vendor calibration constants and are not tunable at runtime.
    pub const fn coefficients(&self) -> Coefficients {
        match self {
            MediumType::Propane | MediumType::Custom => Coefficients {
                c0: 0.573045,
                c1: -0.002822,
                c2: -0.00000535,
            },
            MediumType::Air => Coefficients {
                c0: 0.153096,
                c1: 0.000327,
                c2: -0.000000294,
            },
            MediumType::FreshWater
            | MediumType::WasteWater
            | MediumType::BlackWater
            | MediumType::LiveWell => Coefficients {
                c0: 0.600592,
                c1: 0.003124,
                c2: -0.00001368,
            },
            MediumType::Gasoline
            | MediumType::Diesel
            | MediumType::Lng
            | MediumType::Oil
            | MediumType::HydraulicOil => Coefficients {
                c0: 0.7373417462,
                c1: -0.001978229885,
                c2: 0.00000202162,
            },
        }
    }

    /// Configuration key for this medium
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediumType::Propane => "propane",
            MediumType::Air => "air",
            MediumType::FreshWater => "fresh_water",
            MediumType::WasteWater => "waste_water",
            MediumType::BlackWater => "black_water",
            MediumType::LiveWell => "live_well",
            MediumType::Gasoline => "gasoline",
            MediumType::Diesel => "diesel",
            MediumType::Lng => "lng",
            MediumType::Oil => "oil",
            MediumType::HydraulicOil => "hydraulic_oil",
            MediumType::Custom => "custom",
        }
    }

    /// Look up a medium by its configuration key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "propane" => Some(MediumType::Propane),
            "air" => Some(MediumType::Air),
            "fresh_water" => Some(MediumType::FreshWater),
            "waste_water" => Some(MediumType::WasteWater),
            "black_water" => Some(MediumType::BlackWater),
            "live_well" => Some(MediumType::LiveWell),
            "gasoline" => Some(MediumType::Gasoline),
            "diesel" => Some(MediumType::Diesel),
            "lng" => Some(MediumType::Lng),
            "oil" => Some(MediumType::Oil),
            "hydraulic_oil" => Some(MediumType::HydraulicOil),
            "custom" => Some(MediumType::Custom),
            _ => None,
        }
    }
}

/// Apply medium-specific temperature compensation to a raw distance.
///
/// Total over all inputs, no failure mode. The result is signed: a
/// negative factor at extreme low temperatures yields a small negative
/// distance, which downstream geometry resolves to an empty tank.
pub fn compensate_distance(distance_raw_mm: u16, temp_raw: u8, medium: MediumType) -> i32 {
    let Coefficients { c0, c1, c2 } = medium.coefficients();
    let t = temp_raw as f64;
    let factor = c0 + c1 * t + c2 * t * t;
    // Truncation toward zero, matching the vendor's integer conversion
    (distance_raw_mm as f64 * factor) as i32
}
