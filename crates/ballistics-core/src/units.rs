//! Unit-quantity system.
//!
//! A [`Quantity`] pairs a magnitude with a [`Unit`]. Construction normalizes
//! the magnitude to the dimension's canonical SI unit; the unit passed to
//! `new` is retained only as the *display* unit, used for formatting and by
//! [`Quantity::in_unit`] when a caller re-reads the value back out. Every
//! arithmetic operation works on canonical magnitudes, so a chain of
//! conversions never accumulates the usual round-trip error of repeatedly
//! multiplying and dividing by the same factor.

use crate::error::DimensionError;
use std::fmt;

/// Relative tolerance used by [`Quantity`]'s `PartialEq` impl.
pub const EQ_TOLERANCE: f64 = 1e-6;

/// The physical dimension a [`Unit`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Length,
    Angle,
    Velocity,
    Weight,
    Pressure,
    Temperature,
    Energy,
    Density,
    Acceleration,
    Time,
}

/// A concrete unit within a [`Dimension`].
///
/// Linear units (everything but temperature) convert to their dimension's
/// canonical unit by a single multiplicative factor. Temperature uses an
/// affine conversion instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    // Length (canonical: meter)
    Meter,
    Centimeter,
    Millimeter,
    Kilometer,
    Yard,
    Foot,
    Inch,
    // Angle (canonical: radian)
    Radian,
    Degree,
    Mil,
    Moa,
    Mrad,
    Iphy,
    // Velocity (canonical: m/s)
    MetersPerSecond,
    FeetPerSecond,
    KilometersPerHour,
    MilesPerHour,
    // Weight (canonical: kilogram)
    Kilogram,
    Gram,
    Pound,
    Grain,
    // Pressure (canonical: pascal)
    Pascal,
    Hectopascal,
    Millibar,
    InchesOfMercury,
    // Temperature (canonical: kelvin)
    Kelvin,
    Celsius,
    Fahrenheit,
    // Energy (canonical: joule)
    Joule,
    FootPound,
    // Density (canonical: kg/m^3)
    KilogramsPerCubicMeter,
    // Acceleration (canonical: m/s^2)
    MetersPerSecondSquared,
    FeetPerSecondSquared,
    // Time (canonical: second)
    Second,
    Millisecond,
}

impl Unit {
    pub fn dimension(self) -> Dimension {
        use Unit::*;
        match self {
            Meter | Centimeter | Millimeter | Kilometer | Yard | Foot | Inch => Dimension::Length,
            Radian | Degree | Mil | Moa | Mrad | Iphy => Dimension::Angle,
            MetersPerSecond | FeetPerSecond | KilometersPerHour | MilesPerHour => {
                Dimension::Velocity
            }
            Kilogram | Gram | Pound | Grain => Dimension::Weight,
            Pascal | Hectopascal | Millibar | InchesOfMercury => Dimension::Pressure,
            Kelvin | Celsius | Fahrenheit => Dimension::Temperature,
            Joule | FootPound => Dimension::Energy,
            KilogramsPerCubicMeter => Dimension::Density,
            MetersPerSecondSquared | FeetPerSecondSquared => Dimension::Acceleration,
            Second | Millisecond => Dimension::Time,
        }
    }

    /// Multiplicative factor to the dimension's canonical unit. Meaningless
    /// for temperature, which uses [`Unit::to_canonical`]/[`Unit::from_canonical`] instead.
    fn linear_factor(self) -> f64 {
        use Unit::*;
        match self {
            Meter => 1.0,
            Centimeter => 0.01,
            Millimeter => 0.001,
            Kilometer => 1000.0,
            Yard => 0.9144,
            Foot => 0.3048,
            Inch => 0.0254,

            Radian => 1.0,
            Degree => std::f64::consts::PI / 180.0,
            Mil => 2.0 * std::f64::consts::PI / 6400.0,
            Moa => std::f64::consts::PI / (180.0 * 60.0),
            Mrad => 0.001,
            // 1 iphy ~= 0.9549 MOA
            Iphy => 0.9549 * (std::f64::consts::PI / (180.0 * 60.0)),

            MetersPerSecond => 1.0,
            FeetPerSecond => 0.3048,
            KilometersPerHour => 1000.0 / 3600.0,
            MilesPerHour => 1609.344 / 3600.0,

            Kilogram => 1.0,
            Gram => 0.001,
            Pound => 0.45359237,
            Grain => 0.45359237 / 7000.0,

            Pascal => 1.0,
            Hectopascal => 100.0,
            Millibar => 100.0,
            InchesOfMercury => 3386.389,

            Kelvin | Celsius | Fahrenheit => 1.0, // handled affinely below

            Joule => 1.0,
            FootPound => 1.3558179483314004,

            KilogramsPerCubicMeter => 1.0,

            MetersPerSecondSquared => 1.0,
            FeetPerSecondSquared => 0.3048,

            Second => 1.0,
            Millisecond => 0.001,
        }
    }

    /// Convert a magnitude expressed in `self` to the dimension's canonical unit.
    pub fn to_canonical(self, magnitude: f64) -> f64 {
        match self {
            Unit::Celsius => magnitude + 273.15,
            Unit::Fahrenheit => (magnitude - 32.0) * (5.0 / 9.0) + 273.15,
            _ => magnitude * self.linear_factor(),
        }
    }

    /// Convert a canonical magnitude back to `self`.
    pub fn from_canonical(self, canonical: f64) -> f64 {
        match self {
            Unit::Celsius => canonical - 273.15,
            Unit::Fahrenheit => (canonical - 273.15) * (9.0 / 5.0) + 32.0,
            _ => canonical / self.linear_factor(),
        }
    }

    /// Short symbol used by [`Quantity`]'s `Display` impl.
    fn symbol(self) -> &'static str {
        use Unit::*;
        match self {
            Meter => "m",
            Centimeter => "cm",
            Millimeter => "mm",
            Kilometer => "km",
            Yard => "yd",
            Foot => "ft",
            Inch => "in",
            Radian => "rad",
            Degree => "deg",
            Mil => "mil",
            Moa => "MOA",
            Mrad => "mrad",
            Iphy => "iphy",
            MetersPerSecond => "m/s",
            FeetPerSecond => "ft/s",
            KilometersPerHour => "km/h",
            MilesPerHour => "mph",
            Kilogram => "kg",
            Gram => "g",
            Pound => "lb",
            Grain => "gr",
            Pascal => "Pa",
            Hectopascal => "hPa",
            Millibar => "mbar",
            InchesOfMercury => "inHg",
            Kelvin => "K",
            Celsius => "C",
            Fahrenheit => "F",
            Joule => "J",
            FootPound => "ft*lb",
            KilogramsPerCubicMeter => "kg/m^3",
            MetersPerSecondSquared => "m/s^2",
            FeetPerSecondSquared => "ft/s^2",
            Second => "s",
            Millisecond => "ms",
        }
    }
}

/// Default display precision (decimal places) per dimension.
fn default_precision(dimension: Dimension) -> usize {
    match dimension {
        Dimension::Length => 3,
        Dimension::Angle => 4,
        Dimension::Velocity => 1,
        Dimension::Weight => 2,
        Dimension::Pressure => 1,
        Dimension::Temperature => 1,
        Dimension::Energy => 1,
        Dimension::Density => 4,
        Dimension::Acceleration => 3,
        Dimension::Time => 4,
    }
}

/// An immutable physical quantity: a magnitude tagged with a dimension and a
/// preferred display unit.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    canonical: f64,
    dimension: Dimension,
    display_unit: Unit,
}

impl Quantity {
    /// Construct a quantity from a magnitude expressed in `unit`.
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self {
            canonical: unit.to_canonical(magnitude),
            dimension: unit.dimension(),
            display_unit: unit,
        }
    }

    /// Build directly from an already-canonical magnitude, tagging it with a
    /// display unit for later formatting/conversion.
    pub fn from_canonical(canonical: f64, display_unit: Unit) -> Self {
        Self {
            canonical,
            dimension: display_unit.dimension(),
            display_unit,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn display_unit(&self) -> Unit {
        self.display_unit
    }

    /// The magnitude in the dimension's canonical unit.
    pub fn canonical(&self) -> f64 {
        self.canonical
    }

    /// The magnitude in this quantity's display unit.
    pub fn value(&self) -> f64 {
        self.display_unit.from_canonical(self.canonical)
    }

    /// Read the magnitude in an arbitrary unit of the same dimension.
    pub fn in_unit(&self, unit: Unit) -> Result<f64, DimensionError> {
        self.require_same_dimension(unit.dimension())?;
        Ok(unit.from_canonical(self.canonical))
    }

    /// Re-express this quantity with a different display unit, same
    /// canonical magnitude.
    pub fn with_display_unit(&self, unit: Unit) -> Result<Self, DimensionError> {
        self.require_same_dimension(unit.dimension())?;
        Ok(Self {
            canonical: self.canonical,
            dimension: self.dimension,
            display_unit: unit,
        })
    }

    fn require_same_dimension(&self, other: Dimension) -> Result<(), DimensionError> {
        if self.dimension == other {
            Ok(())
        } else {
            Err(DimensionError::Mismatch {
                lhs: self.dimension,
                rhs: other,
            })
        }
    }

    /// Checked addition: fails if `other` is a different dimension.
    pub fn checked_add(&self, other: &Self) -> Result<Self, DimensionError> {
        self.require_same_dimension(other.dimension)?;
        Ok(Self {
            canonical: self.canonical + other.canonical,
            dimension: self.dimension,
            display_unit: self.display_unit,
        })
    }

    /// Checked subtraction: fails if `other` is a different dimension.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, DimensionError> {
        self.require_same_dimension(other.dimension)?;
        Ok(Self {
            canonical: self.canonical - other.canonical,
            dimension: self.dimension,
            display_unit: self.display_unit,
        })
    }

    /// Scale by a dimensionless factor; display unit is preserved.
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            canonical: self.canonical * factor,
            dimension: self.dimension,
            display_unit: self.display_unit,
        }
    }
}

impl std::ops::Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        self.scale(rhs)
    }
}

impl std::ops::Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        self.scale(1.0 / rhs)
    }
}

impl std::ops::Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        self.scale(-1.0)
    }
}

impl approx::AbsDiffEq for Quantity {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EQ_TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.dimension == other.dimension && (self.canonical - other.canonical).abs() <= epsilon
    }
}

impl approx::RelativeEq for Quantity {
    fn default_max_relative() -> f64 {
        EQ_TOLERANCE
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        if self.dimension != other.dimension {
            return false;
        }
        let scale = self.canonical.abs().max(other.canonical.abs()).max(1.0);
        (self.canonical - other.canonical).abs() <= epsilon.max(max_relative * scale)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        approx::RelativeEq::relative_eq(self, other, EQ_TOLERANCE, EQ_TOLERANCE)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.dimension != other.dimension {
            return None;
        }
        self.canonical.partial_cmp(&other.canonical)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = default_precision(self.dimension);
        write!(f, "{:.*} {}", precision, self.value(), self.display_unit.symbol())
    }
}
