//! Tank Geometry and Fill Percentage
//!
//! ## Overview
//!
//! The sensor reports the height of the liquid column above it. Turning
//! that depth into "percent full" requires the tank's shape, because the
//! horizontal cross-section changes with height everywhere except the
//! straight cylindrical midsection.
//!
//! Two shape models cover the supported tanks:
//!
//! - **Vertical**: an upright cylinder capped top and bottom by a
//!   hemi-ellipsoid with semi-axes `a = b = radius`, `c = radius/2`. This
//!   is the familiar BBQ/LP bottle profile. Partial volume has three
//!   closed-form regions: bottom cap, straight side, top cap (the top cap
//!   mirrors the bottom one).
//!
//! - **Horizontal**: a cylinder lying on its side with hemispherical ends,
//!   modeled as one full sphere plus a cylindrical midsection. Partial
//!   volume is a spherical cap plus a circular segment swept along the
//!   side length.
//!
//! ```text
//!   vertical                      horizontal
//!      ___                        _________________
//!    /     \   <- cap c=r/2     /                   \
//!   |       |                  |  - - - - - - - - -  | <- fill_depth
//!   |       |  <- side          \ _________________ /      from bottom
//!    \ ___ /
//! ```
//!
//! ## Units and Precision
//!
//! All dimensions are millimeters; volumes are mm³ held in `f64`. The
//! largest supported tank is ~4.6e9 mm³, where `f32` would start losing
//! integer millimeters to cancellation in the cap formulas.
//!
//! ## Degenerate Specifications
//!
//! A spec whose wall thickness consumes the whole diameter (or with zero
//! dimensions) produces a non-positive radius or maximum volume. That is
//! a configuration error belonging to the caller; the calculator must not
//! fault on it, so divisions are guarded and the result pinned to 0%.

use core::f64::consts::PI;

use crate::constants::DEFAULT_WALL_THICKNESS_MM;

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Tank mounting orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TankOrientation {
    /// Upright cylinder, sensor under the bottom dome
    Vertical,
    /// Cylinder on its side, sensor under the lowest point
    Horizontal,
}

/// Tank geometry specification
///
/// External dimensions as printed on the data plate; internal dimensions
/// are derived by subtracting the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TankSpec {
    /// Stable configuration id, e.g. `20lb_v`
    pub id: &'static str,
    /// Human-readable name for display
    pub display_name: &'static str,
    /// Mounting orientation, selects the volume model
    pub orientation: TankOrientation,
    /// Overall external length (vertical: height) in mm
    pub overall_length_mm: f64,
    /// Overall external diameter in mm
    pub overall_diameter_mm: f64,
    /// Wall thickness in mm, subtracted twice from the diameter
    pub wall_thickness_mm: f64,
}

/// Fallback tank id used when a configured id is not recognized
pub const DEFAULT_TANK_ID: &str = "20lb_v";

/// Built-in tank specifications.
///
/// Dimensions are the common data-plate values for each size. `custom` is
/// a deliberately bland vertical spec for tanks not in the table.
pub static TANK_SPECS: &[TankSpec] = &[
    TankSpec::new("20lb_v", "20lb Vertical", TankOrientation::Vertical, 316.0, 304.8),
    TankSpec::new("30lb_v", "30lb Vertical", TankOrientation::Vertical, 422.0, 304.8),
    TankSpec::new("40lb_v", "40lb Vertical", TankOrientation::Vertical, 457.0, 304.8),
    TankSpec::new("250gal_h", "250 Gallon Horizontal", TankOrientation::Horizontal, 2387.6, 762.0),
    TankSpec::new("500gal_h", "500 Gallon Horizontal", TankOrientation::Horizontal, 3022.6, 952.5),
    TankSpec::new("1000gal_h", "1000 Gallon Horizontal", TankOrientation::Horizontal, 4877.5, 1041.4),
    TankSpec::new("europe_6kg", "6kg European Vertical", TankOrientation::Vertical, 340.0, 240.0),
    TankSpec::new("europe_11kg", "11kg European Vertical", TankOrientation::Vertical, 390.0, 290.0),
    TankSpec::new("europe_14kg", "14kg European Vertical", TankOrientation::Vertical, 430.0, 290.0),
    TankSpec::new("custom", "Custom Tank", TankOrientation::Vertical, 300.0, 300.0),
];

impl TankSpec {
    /// Create a spec with the default 1/8" wall thickness
    pub const fn new(
        id: &'static str,
        display_name: &'static str,
        orientation: TankOrientation,
        overall_length_mm: f64,
        overall_diameter_mm: f64,
    ) -> Self {
        Self {
            id,
            display_name,
            orientation,
            overall_length_mm,
            overall_diameter_mm,
            wall_thickness_mm: DEFAULT_WALL_THICKNESS_MM,
        }
    }

    /// Override the wall thickness for non-standard tanks
    pub const fn with_wall_thickness(mut self, wall_thickness_mm: f64) -> Self {
        self.wall_thickness_mm = wall_thickness_mm;
        self
    }

    /// Find a built-in spec by id
    pub fn find(id: &str) -> Option<&'static TankSpec> {
        TANK_SPECS.iter().find(|spec| spec.id == id)
    }

    /// Look up a built-in spec, falling back to [`DEFAULT_TANK_ID`].
    ///
    /// Unknown ids come from stale or hand-edited configuration; decoding
    /// with the default small vertical tank is more useful than refusing.
    pub fn for_id(id: &str) -> &'static TankSpec {
        Self::find(id).unwrap_or_else(|| {
            log_warn!("unknown tank id {:?}, using {}", id, DEFAULT_TANK_ID);
            Self::find(DEFAULT_TANK_ID).expect("default tank spec present in table")
        })
    }

    /// Internal diameter: overall minus two walls
    pub fn internal_diameter_mm(&self) -> f64 {
        self.overall_diameter_mm - 2.0 * self.wall_thickness_mm
    }

    /// Internal radius
    pub fn radius_mm(&self) -> f64 {
        self.internal_diameter_mm() / 2.0
    }

    /// Length of the straight cylindrical midsection.
    ///
    /// Vertical tanks lose half the internal diameter to the two quarter
    /// height caps; horizontal tanks lose a full diameter to the two
    /// hemispherical ends.
    pub fn side_length_mm(&self) -> f64 {
        match self.orientation {
            TankOrientation::Vertical => {
                self.overall_length_mm - self.internal_diameter_mm() / 2.0
            }
            TankOrientation::Horizontal => self.overall_length_mm - self.overall_diameter_mm,
        }
    }

    /// Convert a compensated sensor distance into fill percent.
    ///
    /// The wall is dead distance before the liquid column: depth below it
    /// reads as an empty tank. Always returns a value in `[0.0, 100.0]`;
    /// degenerate specs produce 0% instead of faulting.
    pub fn fill_percent(&self, compensated_distance_mm: f64) -> f64 {
        let fill_depth = compensated_distance_mm - self.wall_thickness_mm;
        if fill_depth < 0.0 {
            return 0.0;
        }

        let radius = self.radius_mm();
        if radius <= 0.0 {
            log_warn!("tank {:?} has non-positive internal radius", self.id);
            return 0.0;
        }

        match self.orientation {
            TankOrientation::Vertical => {
                vertical_fill_percent(fill_depth, radius, self.side_length_mm())
            }
            TankOrientation::Horizontal => {
                horizontal_fill_percent(fill_depth, radius, self.side_length_mm())
            }
        }
    }
}

/// Partial volume of a hemi-ellipsoid cap filled to `depth` from its base.
///
/// Semi-axes are `a = b = radius` horizontally and `c` vertically; the
/// closed form integrates the elliptical cross-section from the cap floor.
/// At `depth = 0` the bracket cancels to zero, at `depth = c` it reaches
/// the half-ellipsoid volume `(2/3)·π·a·b·c`.
fn ellipsoid_cap_volume(depth: f64, radius: f64, c: f64) -> f64 {
    let remaining = c - depth;
    PI * radius * radius * ((2.0 / 3.0) * c - c + depth + remaining * remaining * remaining / (3.0 * c * c))
}

fn vertical_fill_percent(fill_depth: f64, radius: f64, side_length: f64) -> f64 {
    let cap_height = radius / 2.0;
    let tank_height = side_length + cap_height;
    if fill_depth > tank_height {
        return 100.0;
    }

    let cap_volume = (2.0 / 3.0) * PI * radius * radius * cap_height;
    let cylinder_volume = side_length * PI * radius * radius;
    let max_volume = 2.0 * cap_volume + cylinder_volume;
    if max_volume <= 0.0 {
        log_warn!("vertical tank with non-positive volume, check dimensions");
        return 0.0;
    }

    let fill_volume = if fill_depth <= cap_height {
        // Surface inside the bottom dome
        ellipsoid_cap_volume(fill_depth, radius, cap_height)
    } else if fill_depth <= cap_height + side_length {
        // Surface in the straight side
        cap_volume + (fill_depth - cap_height) * PI * radius * radius
    } else if fill_depth <= tank_height {
        // Surface inside the top dome: mirror of the bottom cap, measured
        // as the empty headspace subtracted from the full tank
        let top_depth = tank_height - fill_depth;
        max_volume - ellipsoid_cap_volume(top_depth, radius, cap_height)
    } else {
        // Unreachable for finite inputs; NaN lands here
        return 0.0;
    };

    if fill_volume < 0.0 {
        return 0.0;
    }
    (100.0 * fill_volume / max_volume).clamp(0.0, 100.0)
}

fn horizontal_fill_percent(fill_depth: f64, radius: f64, side_length: f64) -> f64 {
    if fill_depth > 2.0 * radius {
        return 100.0;
    }
    if fill_depth < 0.0 {
        return 0.0;
    }

    let sphere_volume = (4.0 / 3.0) * PI * radius * radius * radius;
    let cylinder_volume = side_length * PI * radius * radius;
    let max_volume = sphere_volume + cylinder_volume;
    if max_volume <= 0.0 {
        log_warn!("horizontal tank with non-positive volume, check dimensions");
        return 0.0;
    }

    // Spherical cap of height fill_depth (both hemispherical ends together
    // make one sphere)
    let fill_spherical = (PI / 3.0) * fill_depth * fill_depth * (3.0 * radius - fill_depth);

    // Circular segment area swept along the straight midsection; the sqrt
    // argument only goes negative through floating point noise at the rim
    let submerged = radius - fill_depth;
    let chord = libm::sqrt((2.0 * radius * fill_depth - fill_depth * fill_depth).max(0.0));
    let fill_cylinder =
        side_length * (radius * radius * libm::acos(submerged / radius) - submerged * chord);

    let fill_volume = fill_spherical + fill_cylinder;
    (100.0 * fill_volume / max_volume).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str) -> &'static TankSpec {
        TankSpec::find(id).unwrap()
    }

    #[test]
    fn derived_dimensions() {
        let tank = spec("20lb_v");
        assert_eq!(tank.internal_diameter_mm(), 304.8 - 2.0 * 3.175);
        assert_eq!(tank.radius_mm(), tank.internal_diameter_mm() / 2.0);
        assert_eq!(
            tank.side_length_mm(),
            316.0 - tank.internal_diameter_mm() / 2.0
        );

        let horizontal = spec("250gal_h");
        assert_eq!(horizontal.side_length_mm(), 2387.6 - 762.0);
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        assert_eq!(TankSpec::for_id("no_such_tank").id, DEFAULT_TANK_ID);
        assert_eq!(TankSpec::for_id("500gal_h").id, "500gal_h");
        assert!(TankSpec::find("no_such_tank").is_none());
    }

    #[test]
    fn vertical_empty_and_full_boundaries() {
        let tank = spec("20lb_v");
        let wall = tank.wall_thickness_mm;

        // Distance equal to the wall means zero fill depth
        assert_eq!(tank.fill_percent(wall), 0.0);
        // Below the wall reads as empty, never negative
        assert_eq!(tank.fill_percent(0.0), 0.0);

        // Exactly at tank height the top-cap formula closes to 100%
        let tank_height = tank.side_length_mm() + tank.radius_mm() / 2.0;
        let full = tank.fill_percent(wall + tank_height);
        assert!((full - 100.0).abs() < 1e-9, "got {full}");

        // Beyond the tank height clamps to 100%
        assert_eq!(tank.fill_percent(wall + tank_height + 50.0), 100.0);
    }

    #[test]
    fn vertical_cylinder_region_midpoint() {
        let tank = spec("30lb_v");
        let wall = tank.wall_thickness_mm;
        let radius = tank.radius_mm();
        let cap_height = radius / 2.0;
        let side = tank.side_length_mm();

        // Halfway up the straight side: one cap plus half the cylinder
        let percent = tank.fill_percent(wall + cap_height + side / 2.0);

        let cap = (2.0 / 3.0) * PI * radius * radius * cap_height;
        let cylinder = side * PI * radius * radius;
        let expected = 100.0 * (cap + cylinder / 2.0) / (2.0 * cap + cylinder);
        assert!((percent - expected).abs() < 1e-9);
    }

    #[test]
    fn horizontal_half_fill_is_fifty_percent() {
        for id in ["250gal_h", "500gal_h", "1000gal_h"] {
            let tank = spec(id);
            let percent = tank.fill_percent(tank.wall_thickness_mm + tank.radius_mm());
            assert!((percent - 50.0).abs() < 1e-9, "{id}: got {percent}");
        }
    }

    #[test]
    fn horizontal_empty_and_full_boundaries() {
        let tank = spec("500gal_h");
        let wall = tank.wall_thickness_mm;
        let diameter = 2.0 * tank.radius_mm();

        assert_eq!(tank.fill_percent(wall), 0.0);
        let full = tank.fill_percent(wall + diameter);
        assert!((full - 100.0).abs() < 1e-9, "got {full}");
        assert_eq!(tank.fill_percent(wall + diameter + 1.0), 100.0);
    }

    #[test]
    fn fill_percent_is_monotonic() {
        for id in ["20lb_v", "europe_6kg", "250gal_h", "custom"] {
            let tank = spec(id);
            let mut previous = -1.0;
            // Sweep past the full point in sub-millimeter steps
            for step in 0..6000 {
                let distance = tank.wall_thickness_mm + step as f64 * 0.2;
                let percent = tank.fill_percent(distance);
                assert!(
                    percent >= previous,
                    "{id}: {percent} < {previous} at {distance} mm"
                );
                assert!((0.0..=100.0).contains(&percent));
                previous = percent;
            }
            assert_eq!(previous, 100.0, "{id} never reached full");
        }
    }

    #[test]
    fn degenerate_spec_reads_empty() {
        // Wall consumes the whole diameter: internal radius is negative
        let solid = TankSpec::new("solid", "Solid", TankOrientation::Vertical, 300.0, 5.0);
        assert_eq!(solid.fill_percent(100.0), 0.0);

        let flat = TankSpec::new("flat", "Flat", TankOrientation::Horizontal, 0.0, 0.0)
            .with_wall_thickness(0.0);
        assert_eq!(flat.fill_percent(50.0), 0.0);
    }

    #[test]
    fn custom_wall_thickness_shifts_the_dead_zone() {
        let thick = TankSpec::new("t", "T", TankOrientation::Vertical, 316.0, 304.8)
            .with_wall_thickness(10.0);
        assert_eq!(thick.fill_percent(9.9), 0.0);
        assert!(thick.fill_percent(30.0) > 0.0);
    }
}
